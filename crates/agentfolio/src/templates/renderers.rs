use std::fmt::Write as _;

use crate::profiles::domain::AgentProfile;

use super::sections::{escape_html, render_section, PageSection};
use super::{RenderedPage, TemplateId};

fn assemble(
    template: TemplateId,
    agent: &AgentProfile,
    body_class: &str,
    sections: Vec<PageSection>,
) -> RenderedPage {
    let title = format!("{} — {} | {}", agent.name, agent.area, agent.city);
    let mut html = String::new();
    let _ = write!(
        html,
        "<!doctype html><html><head><title>{}</title></head><body class=\"{}\">",
        escape_html(&title),
        body_class
    );
    for section in &sections {
        html.push_str(&render_section(*section, agent));
    }
    html.push_str("</body></html>");

    RenderedPage {
        template,
        title,
        sections,
        html,
    }
}

/// The default layout: straight top-to-bottom composition.
pub(super) fn render_classic(agent: &AgentProfile) -> RenderedPage {
    assemble(
        TemplateId::Classic,
        agent,
        "template-classic",
        vec![
            PageSection::Header,
            PageSection::Hero,
            PageSection::About,
            PageSection::PropertiesList,
            PageSection::Testimonials,
            PageSection::Faq,
            PageSection::Contact,
            PageSection::Footer,
        ],
    )
}

/// Listings-first layout for agents whose inventory is the draw.
pub(super) fn render_skyline(agent: &AgentProfile) -> RenderedPage {
    assemble(
        TemplateId::Skyline,
        agent,
        "template-skyline",
        vec![
            PageSection::Header,
            PageSection::Hero,
            PageSection::PropertiesList,
            PageSection::Testimonials,
            PageSection::About,
            PageSection::Faq,
            PageSection::Contact,
            PageSection::Footer,
        ],
    )
}

/// Relationship-led layout: testimonials before the inventory.
pub(super) fn render_courtyard(agent: &AgentProfile) -> RenderedPage {
    assemble(
        TemplateId::Courtyard,
        agent,
        "template-courtyard",
        vec![
            PageSection::Header,
            PageSection::Hero,
            PageSection::Testimonials,
            PageSection::About,
            PageSection::PropertiesList,
            PageSection::Contact,
            PageSection::Faq,
            PageSection::Footer,
        ],
    )
}

/// Contact-forward layout with the form directly under the hero.
pub(super) fn render_vista(agent: &AgentProfile) -> RenderedPage {
    assemble(
        TemplateId::Vista,
        agent,
        "template-vista",
        vec![
            PageSection::Header,
            PageSection::Hero,
            PageSection::Contact,
            PageSection::About,
            PageSection::PropertiesList,
            PageSection::Faq,
            PageSection::Testimonials,
            PageSection::Footer,
        ],
    )
}
