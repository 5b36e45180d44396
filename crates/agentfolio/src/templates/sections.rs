use std::fmt::Write as _;

use serde::Serialize;

use crate::profiles::domain::{AgentProfile, ListingStatus};

/// The capability set every template composes. Each renderer decides the
/// order and surrounding structure; the builders below produce the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSection {
    Header,
    Hero,
    About,
    PropertiesList,
    Testimonials,
    Faq,
    Contact,
    Footer,
}

impl PageSection {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Hero => "hero",
            Self::About => "about",
            Self::PropertiesList => "properties_list",
            Self::Testimonials => "testimonials",
            Self::Faq => "faq",
            Self::Contact => "contact",
            Self::Footer => "footer",
        }
    }
}

pub(super) fn render_section(section: PageSection, agent: &AgentProfile) -> String {
    match section {
        PageSection::Header => render_header(agent),
        PageSection::Hero => render_hero(agent),
        PageSection::About => render_about(agent),
        PageSection::PropertiesList => render_properties(agent),
        PageSection::Testimonials => render_testimonials(agent),
        PageSection::Faq => render_faq(agent),
        PageSection::Contact => render_contact(agent),
        PageSection::Footer => render_footer(agent),
    }
}

fn render_header(agent: &AgentProfile) -> String {
    format!(
        "<header><span class=\"brand\">{}</span><nav><a href=\"#about\">About</a>\
         <a href=\"#properties\">Properties</a><a href=\"#contact\">Contact</a></nav></header>",
        escape_html(&agent.name)
    )
}

fn render_hero(agent: &AgentProfile) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"hero\">");
    if let Some(photo) = &agent.profile_photo_url {
        let _ = write!(
            html,
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(photo),
            escape_html(&agent.name)
        );
    }
    let _ = write!(
        html,
        "<h1>{}</h1><p class=\"tagline\">Real estate agent in {}, {}</p>",
        escape_html(&agent.name),
        escape_html(&agent.area),
        escape_html(&agent.city)
    );
    html.push_str("</section>");
    html
}

fn render_about(agent: &AgentProfile) -> String {
    let mut html = String::new();
    html.push_str("<section id=\"about\" class=\"about\"><h2>About</h2>");
    let _ = write!(html, "<p>{}</p>", escape_html(&agent.bio));
    let _ = write!(
        html,
        "<p class=\"experience\">{} years of experience</p>",
        agent.experience_years
    );
    if !agent.awards.is_empty() {
        html.push_str("<ul class=\"awards\">");
        for award in agent.awards.iter().filter(|award| award.visible) {
            let _ = write!(html, "<li>{}</li>", escape_html(&award.title));
        }
        html.push_str("</ul>");
    }
    html.push_str("</section>");
    html
}

fn render_properties(agent: &AgentProfile) -> String {
    let mut html = String::new();
    html.push_str("<section id=\"properties\" class=\"properties\"><h2>Properties</h2>");
    let active: Vec<_> = agent
        .listings
        .iter()
        .filter(|listing| listing.status == ListingStatus::Active)
        .collect();
    if active.is_empty() {
        html.push_str("<p class=\"empty\">No active listings right now.</p>");
    } else {
        html.push_str("<ul>");
        for listing in active {
            let _ = write!(
                html,
                "<li><strong>{}</strong> — {} · ₹{}</li>",
                escape_html(&listing.title),
                escape_html(&listing.locality),
                format_inr(listing.price_inr)
            );
        }
        html.push_str("</ul>");
    }
    html.push_str("</section>");
    html
}

fn render_testimonials(agent: &AgentProfile) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"testimonials\"><h2>Testimonials</h2>");
    for testimonial in agent.testimonials.iter().filter(|entry| entry.visible) {
        let _ = write!(
            html,
            "<blockquote>{}<cite>{}</cite></blockquote>",
            escape_html(&testimonial.quote),
            escape_html(&testimonial.author)
        );
    }
    html.push_str("</section>");
    html
}

fn render_faq(agent: &AgentProfile) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"faq\"><h2>Frequently Asked Questions</h2>");
    for entry in agent.faqs.iter().filter(|entry| entry.visible) {
        let _ = write!(
            html,
            "<details><summary>{}</summary><p>{}</p></details>",
            escape_html(&entry.question),
            escape_html(&entry.answer)
        );
    }
    html.push_str("</section>");
    html
}

fn render_contact(agent: &AgentProfile) -> String {
    format!(
        "<section id=\"contact\" class=\"contact\"><h2>Contact</h2>\
         <form method=\"post\" action=\"/agents/{}/leads\">\
         <input name=\"name\" placeholder=\"Your name\" />\
         <input name=\"phone\" placeholder=\"Phone\" />\
         <textarea name=\"message\" placeholder=\"Message\"></textarea>\
         <button type=\"submit\">Send</button></form></section>",
        escape_html(&agent.slug)
    )
}

fn render_footer(agent: &AgentProfile) -> String {
    format!(
        "<footer><p>{} · {}, {}</p><p>WhatsApp: {}</p></footer>",
        escape_html(&agent.name),
        escape_html(&agent.area),
        escape_html(&agent.city),
        escape_html(&agent.phone)
    )
}

/// Indian digit grouping (1,23,45,678) so prices read naturally.
pub(super) fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    let head_bytes = head.as_bytes();
    let mut index = head_bytes.len() % 2;
    if index == 1 {
        grouped.push(head_bytes[0] as char);
    }
    while index < head_bytes.len() {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push(head_bytes[index] as char);
        grouped.push(head_bytes[index + 1] as char);
        index += 2;
    }
    format!("{grouped},{tail}")
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
