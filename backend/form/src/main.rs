use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use form::{
    FormError, ProfileForm,
    client::{HttpProfileApi, ProfileApi},
    models::{DEFAULT_BASE_URL, Field},
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PROFILE_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the saved profile
    Show,

    /// Edit the profile, unspecified fields keep their saved value
    Set {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Print the caller identity the server sees
    Whoami,
}

fn print_profile(form: &ProfileForm) {
    for field in Field::ALL {
        println!("{:<10}{}", field.label(), form.value(field));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let api = HttpProfileApi::new(args.base_url);

    let mut form = ProfileForm::new();

    match args.command {
        Command::Show => {
            form.load(&api).await;
            print_profile(&form);
        }
        Command::Set {
            username,
            email,
            phone,
        } => {
            form.load(&api).await;
            form.edit();

            for (field, value) in [
                (Field::Username, username),
                (Field::Email, email),
                (Field::Phone, phone),
            ] {
                if let Some(value) = value {
                    form.change(field, value)?;
                }
            }

            let result = form.save(&api).await;

            if let Some(notification) = form.notification() {
                println!("{}", notification.message);
            }

            match result {
                Ok(_) => print_profile(&form),
                Err(FormError::Invalid) => {
                    for (field, error) in form.errors().iter() {
                        eprintln!("{}: {error}", field.label());
                    }
                    bail!("Profile not saved");
                }
                Err(e) => bail!(e),
            }
        }
        Command::Whoami => {
            let identity = api.fetch_user().await?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
    }

    Ok(())
}
