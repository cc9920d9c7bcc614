use std::path::Path;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use pockett_onboarding::config::WizardConfig;
use pockett_onboarding::steps::{
    BasicsController, DetailsController, FixedDelayAcceptance, ReviewSummary, SetupController,
    SubmitController,
};
use pockett_onboarding::store::{LibSqlBackend, SnapshotStore};
use pockett_onboarding::validate::ValidationReport;
use pockett_onboarding::wizard::model::{
    AccountType, Country, InFields, OtherCountryFields, ProductGoal, Step1Patch, Step2Patch,
    Step3Patch,
};
use pockett_onboarding::wizard::{TOTAL_STEPS, WizardStore};

type InputLines = Lines<BufReader<Stdin>>;

/// What the user asked for on a given prompt.
enum Command {
    Set(String, String),
    Next,
    Back,
    Submit,
    Reset,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("set ") {
        let mut parts = rest.splitn(2, ' ');
        let field = parts.next().unwrap_or_default().to_string();
        let value = parts.next().unwrap_or_default().trim().to_string();
        return Command::Set(field, value);
    }
    match line {
        "next" => Command::Next,
        "back" => Command::Back,
        "submit" => Command::Submit,
        "reset" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown,
    }
}

fn print_errors(errors: &ValidationReport) {
    for error in &errors.errors {
        eprintln!("   ✗ {}: {}", error.field, error.message);
    }
}

async fn next_command(lines: &mut InputLines) -> anyhow::Result<Option<Command>> {
    eprint!("> ");
    match lines.next_line().await? {
        Some(line) => Ok(Some(parse_command(&line))),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let db_path =
        std::env::var("POCKETT_DB_PATH").unwrap_or_else(|_| "./data/onboarding.db".to_string());
    let snapshots: Arc<dyn SnapshotStore> =
        Arc::new(LibSqlBackend::new_local(Path::new(&db_path)).await?);
    let store = Arc::new(WizardStore::open(snapshots).await);
    let config = WizardConfig::default();
    let acceptance: Arc<dyn pockett_onboarding::steps::AcceptanceService> =
        Arc::new(FixedDelayAcceptance::new(config.submit_delay));

    eprintln!("💳 CoolPockett onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Snapshots: {}", db_path);
    eprintln!("   Commands: set <field> <value> | next | back | submit | reset | quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let state = store.state().await;
        let keep_going = if state.is_submitted {
            run_submitted(&store, &mut lines).await?
        } else {
            match state.current_step {
                1 => run_basics(&store, &config, &mut lines).await?,
                2 => run_setup(&store, &config, &mut lines).await?,
                3 => run_details(&store, &config, &mut lines).await?,
                _ => run_review(&store, Arc::clone(&acceptance), &mut lines).await?,
            }
        };
        if !keep_going {
            break;
        }
    }

    eprintln!("Bye.");
    Ok(())
}

async fn run_basics(
    store: &Arc<WizardStore>,
    config: &WizardConfig,
    lines: &mut InputLines,
) -> anyhow::Result<bool> {
    let mut controller = BasicsController::activate(Arc::clone(store), config).await;

    eprintln!("── Step 1 of {TOTAL_STEPS} — Account basics");
    let working = controller.working();
    eprintln!(
        "   fullName={:?} email={:?} phone={:?} country={:?}",
        working.full_name,
        working.email,
        working.phone,
        working.country.map(|c| c.code()).unwrap_or(""),
    );
    eprintln!("   Fields: fullName email phone country password");

    loop {
        let Some(command) = next_command(lines).await? else {
            controller.deactivate().await;
            return Ok(false);
        };
        match command {
            Command::Set(field, value) => {
                let patch = match field.as_str() {
                    "fullName" => Step1Patch {
                        full_name: Some(value),
                        ..Default::default()
                    },
                    "email" => Step1Patch {
                        email: Some(value),
                        ..Default::default()
                    },
                    "phone" => Step1Patch {
                        phone: Some(value),
                        ..Default::default()
                    },
                    "country" => Step1Patch {
                        country: Some(Country::from_code(&value)),
                        ..Default::default()
                    },
                    "password" => Step1Patch {
                        password: Some(value),
                        ..Default::default()
                    },
                    other => {
                        eprintln!("   Unknown field: {other}");
                        continue;
                    }
                };
                controller.edit(patch);
            }
            Command::Next => {
                if controller.advance().await {
                    return Ok(true);
                }
                print_errors(controller.errors());
            }
            Command::Back => eprintln!("   Already at the first step."),
            Command::Quit => {
                controller.deactivate().await;
                return Ok(false);
            }
            _ => eprintln!("   Not available here."),
        }
    }
}

async fn run_setup(
    store: &Arc<WizardStore>,
    config: &WizardConfig,
    lines: &mut InputLines,
) -> anyhow::Result<bool> {
    let mut controller = SetupController::activate(Arc::clone(store), config).await;

    eprintln!("── Step 2 of {TOTAL_STEPS} — Account setup");
    let working = controller.working();
    eprintln!(
        "   accountType={:?} productGoal={:?} monthlyVolume={}",
        working.account_type.map(|t| t.to_string()).unwrap_or_default(),
        working.product_goal.map(|g| g.to_string()).unwrap_or_default(),
        working.monthly_volume,
    );
    eprintln!("   Fields: accountType (individual|business) productGoal (spend|save|invest) monthlyVolume (0-100)");

    loop {
        let Some(command) = next_command(lines).await? else {
            controller.deactivate().await;
            return Ok(false);
        };
        match command {
            Command::Set(field, value) => {
                let patch = match field.as_str() {
                    "accountType" => Step2Patch {
                        account_type: Some(AccountType::from_code(&value)),
                        ..Default::default()
                    },
                    "productGoal" => Step2Patch {
                        product_goal: Some(ProductGoal::from_code(&value)),
                        ..Default::default()
                    },
                    "monthlyVolume" => match value.parse::<f64>() {
                        Ok(volume) => Step2Patch {
                            monthly_volume: Some(volume),
                            ..Default::default()
                        },
                        Err(_) => {
                            eprintln!("   Not a number: {value}");
                            continue;
                        }
                    },
                    other => {
                        eprintln!("   Unknown field: {other}");
                        continue;
                    }
                };
                controller.edit(patch);
            }
            Command::Next => {
                if controller.advance().await {
                    return Ok(true);
                }
                print_errors(controller.errors());
            }
            Command::Back => {
                controller.back().await;
                return Ok(true);
            }
            Command::Quit => {
                controller.deactivate().await;
                return Ok(false);
            }
            _ => eprintln!("   Not available here."),
        }
    }
}

async fn run_details(
    store: &Arc<WizardStore>,
    config: &WizardConfig,
    lines: &mut InputLines,
) -> anyhow::Result<bool> {
    let mut controller = DetailsController::activate(Arc::clone(store), config).await;

    let state = store.state().await;
    eprintln!("── Step 3 of {TOTAL_STEPS} — Details");
    eprintln!(
        "   Based on: {} + {}",
        state
            .form_data
            .step2
            .account_type
            .map(|t| t.label())
            .unwrap_or("—"),
        state
            .form_data
            .step1
            .country
            .map(|c| c.label())
            .unwrap_or("—"),
    );
    eprintln!(
        "   Fields: dob address city postal businessName regCountry role state ssn pan nationalId document"
    );

    loop {
        let Some(command) = next_command(lines).await? else {
            controller.deactivate().await;
            return Ok(false);
        };
        match command {
            Command::Set(field, value) => {
                match field.as_str() {
                    "document" => {
                        controller.set_document_file_name(value).await;
                        continue;
                    }
                    _ => {}
                }
                let working = controller.working().clone();
                let patch = match field.as_str() {
                    "dob" | "address" | "city" | "postal" => {
                        let mut record = working.individual.unwrap_or_default();
                        match field.as_str() {
                            "dob" => record.dob = value,
                            "address" => record.address_line1 = value,
                            "city" => record.city = value,
                            _ => record.postal_code = value,
                        }
                        Step3Patch {
                            individual: Some(record),
                            ..Default::default()
                        }
                    }
                    "businessName" | "regCountry" | "role" => {
                        let mut record = working.business.unwrap_or_default();
                        match field.as_str() {
                            "businessName" => record.business_legal_name = value,
                            "regCountry" => record.registration_country = Country::from_code(&value),
                            _ => record.role = value,
                        }
                        Step3Patch {
                            business: Some(record),
                            ..Default::default()
                        }
                    }
                    "state" | "ssn" => {
                        let mut record = working.us_fields.unwrap_or_default();
                        if field == "state" {
                            record.state = value;
                        } else {
                            record.ssn_last4 = value;
                        }
                        Step3Patch {
                            us_fields: Some(record),
                            ..Default::default()
                        }
                    }
                    "pan" => Step3Patch {
                        in_fields: Some(InFields { pan: value }),
                        ..Default::default()
                    },
                    "nationalId" => Step3Patch {
                        other_fields: Some(OtherCountryFields { national_id: value }),
                        ..Default::default()
                    },
                    other => {
                        eprintln!("   Unknown field: {other}");
                        continue;
                    }
                };
                controller.edit(patch);
            }
            Command::Next => {
                if controller.advance().await {
                    return Ok(true);
                }
                print_errors(controller.errors());
            }
            Command::Back => {
                controller.back().await;
                return Ok(true);
            }
            Command::Quit => {
                controller.deactivate().await;
                return Ok(false);
            }
            _ => eprintln!("   Not available here."),
        }
    }
}

async fn run_review(
    store: &Arc<WizardStore>,
    acceptance: Arc<dyn pockett_onboarding::steps::AcceptanceService>,
    lines: &mut InputLines,
) -> anyhow::Result<bool> {
    let controller = SubmitController::new(Arc::clone(store), acceptance);

    eprintln!("── Step 4 of {TOTAL_STEPS} — Review");
    let summary = ReviewSummary::project(&store.state().await);
    for section in &summary.sections {
        eprintln!("   {}", section.title);
        for item in &section.items {
            eprintln!("     {}: {}", item.label, item.value);
        }
    }
    if let Some(preview) = &summary.preview {
        eprintln!("   {}", preview.product_name);
        for feature in &preview.features {
            eprintln!("     • {feature}");
        }
    }

    loop {
        let Some(command) = next_command(lines).await? else {
            return Ok(false);
        };
        match command {
            Command::Submit => {
                if !controller.can_submit().await {
                    eprintln!("   Submission already in progress.");
                    continue;
                }
                eprintln!("   Submitting...");
                controller.submit().await;
                return Ok(true);
            }
            Command::Back => {
                controller.back().await;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
            _ => eprintln!("   Not available here."),
        }
    }
}

async fn run_submitted(
    store: &Arc<WizardStore>,
    lines: &mut InputLines,
) -> anyhow::Result<bool> {
    eprintln!("✔ Application Submitted!");
    eprintln!("   Thank you for applying to CoolPockett. We'll review your application");
    eprintln!("   and get back to you within 24 hours.");
    eprintln!("   Type `reset` to start a new application.");

    loop {
        let Some(command) = next_command(lines).await? else {
            return Ok(false);
        };
        match command {
            Command::Reset => {
                store.reset().await;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
            _ => eprintln!("   Only `reset` or `quit` from here."),
        }
    }
}
