//! Public page rendering: a closed set of template variants, each composing
//! the same section capabilities with a different structure. Values read
//! from storage may predate the enum, so dispatch falls back to the default
//! variant instead of failing the request.

mod renderers;
mod sections;

use serde::{Deserialize, Serialize};

use crate::profiles::domain::AgentProfile;

pub use sections::PageSection;

pub(crate) use sections::escape_html;

/// Closed set of display templates an agent can pick during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    Classic,
    Skyline,
    Courtyard,
    Vista,
}

impl TemplateId {
    pub const DEFAULT: Self = Self::Classic;

    pub const fn ordered() -> [Self; 4] {
        [Self::Classic, Self::Skyline, Self::Courtyard, Self::Vista]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Skyline => "Skyline",
            Self::Courtyard => "Courtyard",
            Self::Vista => "Vista",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Skyline => "skyline",
            Self::Courtyard => "courtyard",
            Self::Vista => "vista",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, UnknownTemplate> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "skyline" => Ok(Self::Skyline),
            "courtyard" => Ok(Self::Courtyard),
            "vista" => Ok(Self::Vista),
            _ => Err(UnknownTemplate(raw.to_string())),
        }
    }

    /// Lenient parse for identifiers arriving from storage. Unknown values
    /// resolve to the default variant and leave a trace for operators.
    pub fn resolve_stored(raw: &str) -> Self {
        match Self::parse(raw) {
            Ok(template) => template,
            Err(UnknownTemplate(value)) => {
                tracing::warn!(template = %value, "unrecognized stored template, using default");
                Self::DEFAULT
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown template identifier '{0}'")]
pub struct UnknownTemplate(pub String);

/// Fully rendered public page plus enough structure to assert on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub template: TemplateId,
    pub title: String,
    pub sections: Vec<PageSection>,
    pub html: String,
}

/// Renders `agent` with the given template. Dispatch is an exhaustive match
/// so adding a variant without a renderer fails to compile.
pub fn render(template: TemplateId, agent: &AgentProfile) -> RenderedPage {
    match template {
        TemplateId::Classic => renderers::render_classic(agent),
        TemplateId::Skyline => renderers::render_skyline(agent),
        TemplateId::Courtyard => renderers::render_courtyard(agent),
        TemplateId::Vista => renderers::render_vista(agent),
    }
}

/// Placeholder served when the publication gate is closed. Always HTTP 200
/// at the route layer; the page itself is fixed.
pub fn render_placeholder(slug: &str) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html><html><head><title>Profile not available</title></head><body>");
    html.push_str("<main class=\"placeholder\">");
    html.push_str("<h1>This profile is not available right now.</h1>");
    html.push_str(&format!(
        "<p>The agent page at <code>/{}</code> is offline. Please check back later.</p>",
        sections::escape_html(slug)
    ));
    html.push_str("</main></body></html>");
    html
}

/// Banner injected above the rendered page for an owner previewing a gated
/// profile, with the affordance to exit to the public rendition.
pub fn owner_preview_banner(slug: &str) -> String {
    format!(
        "<div class=\"preview-banner\">You are previewing an unpublished profile. \
         <a href=\"/agents/{}?view=public\">View as the public sees it</a></div>",
        sections::escape_html(slug)
    )
}
