use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agentfolio::config::VerificationConfig;
use agentfolio::error::AppError;
use agentfolio::listings::{attach, PortalListingImporter};
use agentfolio::moderation::{
    ContentKind, ItemId, ModerationItem, ModerationQueue, ModerationService, ReviewRequest,
};
use agentfolio::onboarding::{
    CommitFailure, DebouncedAutosave, NextOutcome, OnboardingWizard, ProfileCommitter,
    SlugDirectory, WizardError,
};
use agentfolio::profiles::{
    slugify, CommitReceipt, Lead, PlanPolicy, ProfileGuard, ProfilePolicy, ProfileRepository,
    ProfileService, ProfileServiceError, ProfileSubmission, PublicPageKind, ViewerContext,
};
use agentfolio::profiles::slug::{SlugAvailability, SlugError};
use agentfolio::templates::TemplateId;
use agentfolio::verification::VerificationService;
use chrono::Utc;
use clap::Args;

use crate::infra::{
    DevCodeSender, InMemoryAuditLog, InMemoryChallengeStore, InMemoryDraftStore, InMemoryLeadSink,
    InMemoryModerationQueue, InMemoryProfileRepository,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Agent display name for the walkthrough
    #[arg(long, default_value = "Jane Doe")]
    pub(crate) name: String,
    /// Contact email
    #[arg(long, default_value = "jane@example.com")]
    pub(crate) email: String,
    /// WhatsApp number (Indian mobile)
    #[arg(long, default_value = "+919876543210")]
    pub(crate) phone: String,
    /// Operating city
    #[arg(long, default_value = "Hyderabad")]
    pub(crate) city: String,
    /// Primary locality
    #[arg(long, default_value = "Madhapur")]
    pub(crate) area: String,
    /// Page template (classic, skyline, courtyard, vista)
    #[arg(long, default_value = "skyline", value_parser = parse_template)]
    pub(crate) template: TemplateId,
    /// Optional portal CSV export to hydrate listings after commit
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Agent display name
    #[arg(long, default_value = "Jane Doe")]
    pub(crate) name: String,
    /// Operating city
    #[arg(long, default_value = "Hyderabad")]
    pub(crate) city: String,
    /// Primary locality
    #[arg(long, default_value = "Madhapur")]
    pub(crate) area: String,
    /// Page template (classic, skyline, courtyard, vista)
    #[arg(long, default_value = "classic", value_parser = parse_template)]
    pub(crate) template: TemplateId,
    /// Optional portal CSV export to populate the properties section
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

fn parse_template(raw: &str) -> Result<TemplateId, String> {
    TemplateId::parse(raw).map_err(|err| err.to_string())
}

type DemoProfileService = ProfileService<InMemoryProfileRepository, InMemoryLeadSink>;

/// Wizard slug probe backed directly by the in-process allocator.
struct ServiceSlugDirectory {
    service: Arc<DemoProfileService>,
}

impl SlugDirectory for ServiceSlugDirectory {
    fn check(&self, candidate: &str) -> Result<SlugAvailability, SlugError> {
        self.service.check_slug(candidate)
    }
}

/// Wizard terminal commit backed by the in-process profile service.
struct ServiceCommitter {
    service: Arc<DemoProfileService>,
}

impl ProfileCommitter for ServiceCommitter {
    fn commit(&self, submission: ProfileSubmission) -> Result<CommitReceipt, CommitFailure> {
        self.service.commit(submission).map_err(|error| match error {
            ProfileServiceError::Validation(violation) => {
                CommitFailure::Rejected(violation.to_string())
            }
            ProfileServiceError::SlugConflict { suggestion } => CommitFailure::Rejected(format!(
                "slug already in use{}",
                suggestion
                    .map(|alternative| format!(", try '{alternative}'"))
                    .unwrap_or_default()
            )),
            ProfileServiceError::Slug(error) => CommitFailure::Rejected(error.to_string()),
            other => CommitFailure::Unavailable(other.to_string()),
        })
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        name,
        email,
        phone,
        city,
        area,
        template,
        listings_csv,
    } = args;

    println!("Agent onboarding demo");

    let repository = Arc::new(InMemoryProfileRepository::default());
    let leads = InMemoryLeadSink::default();
    let profiles = Arc::new(ProfileService::new(
        repository.clone(),
        Arc::new(leads.clone()),
        ProfilePolicy::default(),
        PlanPolicy::default(),
    ));

    let sender = DevCodeSender::default();
    let verification = Arc::new(VerificationService::new(
        Arc::new(InMemoryChallengeStore::default()),
        Arc::new(sender.clone()),
        VerificationConfig::default(),
    ));

    let autosave = DebouncedAutosave::spawn(
        Arc::new(InMemoryDraftStore::default()),
        Duration::from_millis(800),
    );
    let mut wizard = OnboardingWizard::new(
        ProfilePolicy::default(),
        Box::new(ServiceSlugDirectory {
            service: profiles.clone(),
        }),
        Box::new(ServiceCommitter {
            service: profiles.clone(),
        }),
        Box::new(autosave),
    );

    println!("\nWizard walkthrough ({} steps)", agentfolio::onboarding::WizardStep::COUNT);
    advance(&mut wizard)?; // Welcome

    wizard.set_name(&name);
    advance(&mut wizard)?;
    wizard.set_email(&email);
    advance(&mut wizard)?;
    wizard.set_city(&city);
    advance(&mut wizard)?;
    wizard.set_area(&area);
    advance(&mut wizard)?;

    wizard.set_phone(&phone);
    let dispatch = match verification.send_code(&phone, Utc::now()) {
        Ok(dispatch) => dispatch,
        Err(error) => {
            println!("  Verification refused: {error}");
            return Ok(());
        }
    };
    wizard.mark_code_sent();
    let code = sender.last_code().unwrap_or_default();
    println!(
        "  WhatsApp code dispatched to {} (expires {})",
        dispatch.phone, dispatch.expires_at
    );
    if let Err(error) = verification.verify_code(&phone, &code, Utc::now()) {
        println!("  Verification failed: {error}");
        return Ok(());
    }
    wizard.mark_phone_verified();
    println!("  Phone verified");
    advance(&mut wizard)?;

    wizard.set_date_of_birth("1988-04-02");
    advance(&mut wizard)?;
    wizard.set_experience_years(10);
    advance(&mut wizard)?;

    wizard.set_slug(&slugify(&name));
    loop {
        match wizard.next() {
            Ok(NextOutcome::Advanced { step }) => {
                println!("  -> {}", step.label());
                break;
            }
            Ok(NextOutcome::Committed { .. }) => unreachable!("slug is not the last step"),
            Err(WizardError::Step(error)) => {
                // A taken slug swaps the suggestion into the draft; retry
                // with what the wizard accepted.
                println!("  Slug blocked: {error}; retrying as '{}'", wizard.draft().slug);
            }
            Err(error) => {
                println!("  Slug check unavailable: {error}");
                return Ok(());
            }
        }
    }

    wizard.set_bio(&format!("Helping families find homes in {area}."));
    advance(&mut wizard)?;
    wizard.set_photo_url(Some("https://cdn.example.com/agent.jpg"));
    advance(&mut wizard)?;
    wizard.set_template(template);

    let slug = match wizard.next() {
        Ok(NextOutcome::Committed { slug }) => slug,
        Ok(NextOutcome::Advanced { .. }) => unreachable!("template is the last step"),
        Err(error) => {
            println!("  Commit failed: {error}");
            return Ok(());
        }
    };
    println!("  Committed -> profile live at /agents/{slug}");

    if let Some(path) = listings_csv {
        let import = PortalListingImporter::from_path(path)?;
        let skipped = import.skipped_rows;
        let mut agent = match profiles.fetch(&slug) {
            Ok(agent) => agent,
            Err(error) => {
                println!("  Profile lookup failed: {error}");
                return Ok(());
            }
        };
        let added = attach(&mut agent, import);
        if let Err(error) = repository.update(agent) {
            println!("  Listing import not persisted: {error}");
            return Ok(());
        }
        println!("\nPortal import: {added} listings added, {skipped} rows skipped");
    }

    match profiles.capacity(&slug) {
        Ok(report) => println!("\nCapacity: {}", report.summary),
        Err(error) => println!("\nCapacity unavailable: {error}"),
    }

    match profiles.public_page(&slug, ViewerContext::public(), Utc::now()) {
        Ok(page) => println!(
            "Public page: {:?} rendition, {} bytes of HTML",
            page.kind,
            page.html.len()
        ),
        Err(error) => println!("Public page unavailable: {error}"),
    }

    let lead = Lead {
        name: "R. Kumar".to_string(),
        phone: "+919812345678".to_string(),
        message: format!("Looking for a 2 BHK in {area}."),
        received_at: Utc::now(),
    };
    match profiles.submit_lead(&slug, lead, Utc::now()) {
        Ok(()) => println!("Lead captured ({} total)", leads.captured().len()),
        Err(error) => println!("Lead refused: {error}"),
    }

    // Moderation vignette: an admin takedown closes the gate immediately.
    let queue = Arc::new(InMemoryModerationQueue::default());
    let audit = InMemoryAuditLog::default();
    let moderation = ModerationService::new(queue.clone(), repository.clone(), Arc::new(audit.clone()));
    let queue_item = ModerationItem {
        id: ItemId("demo-review".to_string()),
        agent_slug: slug.clone(),
        kind: ContentKind::Profile,
        content_id: None,
        excerpt: "demo takedown".to_string(),
        submitted_at: Utc::now(),
    };
    if let Err(error) = queue.enqueue(queue_item) {
        println!("\nModeration demo unavailable: {error}");
        return Ok(());
    }
    match moderation.review(
        ReviewRequest {
            item_id: ItemId("demo-review".to_string()),
            remove: true,
            reason: Some("demo takedown".to_string()),
        },
        Utc::now(),
    ) {
        Ok(outcome) => println!(
            "\nModeration: profile {} ({} audit record(s))",
            outcome.action.label(),
            audit.reviews().len()
        ),
        Err(error) => println!("\nModeration failed: {error}"),
    }

    match profiles.public_page(&slug, ViewerContext::public(), Utc::now()) {
        Ok(page) if page.kind == PublicPageKind::Placeholder => {
            println!("Public page now serves the placeholder")
        }
        Ok(page) => println!("Public page unexpectedly {:?}", page.kind),
        Err(error) => println!("Public page unavailable: {error}"),
    }

    Ok(())
}

fn advance(wizard: &mut OnboardingWizard) -> Result<(), AppError> {
    match wizard.next() {
        Ok(NextOutcome::Advanced { step }) => {
            println!("  -> {}", step.label());
            Ok(())
        }
        Ok(NextOutcome::Committed { slug }) => {
            println!("  Committed -> /agents/{slug}");
            Ok(())
        }
        Err(error) => {
            println!("  Step blocked: {error}");
            Ok(())
        }
    }
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        name,
        city,
        area,
        template,
        listings_csv,
    } = args;

    let guard = ProfileGuard::default();
    let submission = ProfileSubmission {
        name: name.clone(),
        email: "preview@example.com".to_string(),
        city,
        area,
        phone: "+919876543210".to_string(),
        date_of_birth: "1988-04-02".to_string(),
        experience_years: 10,
        slug: slugify(&name),
        bio: "Preview profile for template work.".to_string(),
        profile_photo_url: None,
        template: template.key().to_string(),
    };
    let mut agent = match guard.profile_from_submission(submission) {
        Ok(agent) => agent,
        Err(violation) => {
            eprintln!("preview profile rejected: {violation}");
            return Ok(());
        }
    };

    if let Some(path) = listings_csv {
        let import = PortalListingImporter::from_path(path)?;
        attach(&mut agent, import);
    }

    let page = agentfolio::profiles::render_profile(&agent);
    println!("{}", page.html);
    Ok(())
}
