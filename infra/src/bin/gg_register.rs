//! Interactive registration demo
//!
//! Walks through the student or staff registration flow on the terminal.
//! Verification codes are "delivered" by the mock senders, which print them
//! to the console.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use gg_core::domain::entities::StudentLevel;
use gg_core::domain::value_objects::{StaffRegistration, StudentRegistration};
use gg_core::errors::{AuthError, DomainError};
use gg_core::services::RegistrationState;
use gg_infra::{config::load_config, initialize, logging::init_tracing, InfrastructureServices, Workflow};

struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, label: &str) -> Result<String> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(format!("{}: ", label).as_bytes()).await?;
        stdout.flush().await?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => bail!("input closed"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging).context("initializing logging")?;

    let services = initialize(config).await?;
    let mut prompt = Prompt::new();

    if let Some(account) = services.registry.session().current().await {
        println!("Welcome back, {} ({})", account.name, account.role());
    }

    loop {
        let choice = prompt
            .ask("\n[s]tudent registration, s[t]aff registration, [l]ogin, l[o]gout, [q]uit")
            .await?;
        let outcome = match choice.as_str() {
            "s" => register_student(&services, &mut prompt).await,
            "t" => register_staff(&services, &mut prompt).await,
            "l" => login(&services, &mut prompt).await,
            "o" => services.registry.logout().await.map_err(Into::into),
            "q" => return Ok(()),
            _ => {
                println!("Unknown option");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("Error: {}", e);
        }
    }
}

async fn register_student(services: &InfrastructureServices, prompt: &mut Prompt) -> Result<()> {
    let mut workflow = services.workflow();
    loop {
        let level: StudentLevel = prompt
            .ask("Level (beginner/intermediate/advanced)")
            .await?
            .parse()
            .map_err(anyhow::Error::msg)?;
        let mut form = StudentRegistration::new(
            prompt.ask("Full name").await?,
            prompt.ask("Email").await?,
            prompt.ask("Phone").await?,
            prompt.ask("Password").await?,
            level,
            prompt
                .ask("Course ids (comma separated)")
                .await?
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        );
        form.confirm_password = prompt.ask("Confirm password").await?;

        match workflow.submit_student(&form).await {
            Ok(_) => {}
            Err(DomainError::InvalidForm(errors)) => {
                for error in errors.errors() {
                    println!("  {}: {}", error.field, error.message);
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        if verify_codes(&mut workflow, prompt).await? {
            break;
        }
    }

    if let Some(account) = workflow.account() {
        println!(
            "Registration complete. Student id {}",
            account.student_id().unwrap_or_default()
        );
    }
    Ok(())
}

async fn register_staff(services: &InfrastructureServices, prompt: &mut Prompt) -> Result<()> {
    let mut workflow = services.workflow();
    loop {
        let mut form = StaffRegistration::new(
            prompt.ask("First name").await?,
            prompt.ask("Last name").await?,
            prompt.ask("Email").await?,
            prompt.ask("Phone").await?,
            prompt.ask("Department").await?,
            prompt.ask("Qualifications").await?,
            prompt.ask("Password").await?,
        );
        form.confirm_password = prompt.ask("Confirm password").await?;

        match workflow.submit_staff(&form).await {
            Ok(_) => {}
            Err(DomainError::InvalidForm(errors)) => {
                for error in errors.errors() {
                    println!("  {}: {}", error.field, error.message);
                }
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        if verify_codes(&mut workflow, prompt).await? {
            break;
        }
    }

    println!("Registration received. An administrator must approve the account before login.");
    Ok(())
}

/// Drive the code steps; `false` means the user went back to the form
async fn verify_codes(workflow: &mut Workflow, prompt: &mut Prompt) -> Result<bool> {
    loop {
        let label = match workflow.state() {
            RegistrationState::EmailPending => "Email code ('resend' or 'back')",
            RegistrationState::MobilePending => "Phone code ('resend' or 'back')",
            RegistrationState::Started => return Ok(false),
            _ => return Ok(true),
        };

        let input = prompt.ask(label).await?;
        let result = match input.as_str() {
            "resend" => workflow.resend().await.map(|_| ()),
            "back" => workflow.cancel().await.map(|_| ()),
            code if workflow.state() == RegistrationState::EmailPending => {
                workflow.submit_email_code(code).await.map(|_| ())
            }
            code => workflow.submit_mobile_code(code).await.map(|_| ()),
        };

        match result {
            Ok(()) => {}
            Err(DomainError::Auth(AuthError::ResendTooSoon { seconds })) => {
                println!("Please wait {} seconds before requesting a new code", seconds)
            }
            Err(e) => println!("{}", e),
        }
    }
}

async fn login(services: &InfrastructureServices, prompt: &mut Prompt) -> Result<()> {
    let email = prompt.ask("Email").await?;
    let password = prompt.ask("Password").await?;
    let account = services.registry.login(&email, &password).await?;
    println!("Logged in as {} ({})", account.name, account.role());
    Ok(())
}
