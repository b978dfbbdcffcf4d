use anyhow::{bail, Error};
use rideshare::{
    storage::FileStorage,
    views::{DeleteOutcome, NavBar, Submission},
    App, Config, HttpApi, Page, Route,
};
use std::path::PathBuf;
use structopt::StructOpt;
use url::Url;

type Client = App<HttpApi, FileStorage>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::from_args();

    log::debug!("Using the server at {}", args.api_url);

    let config = Config::new(args.api_url, args.state_dir)?;
    log::debug!("Keeping state in {}", config.storage_dir().display());

    let api = HttpApi::with_default_client(config.api_url().clone())?;
    let mut app = App::new(api, FileStorage::new(config.storage_dir()));

    match args.cmd {
        Command::Login { email, password } => {
            let mut form = match app.open(Route::Login).await {
                Page::Login(form) => form,
                other => bail!("Expected the login page, not {}", other.route()),
            };
            form.email = email;
            form.password = password;

            let (api, sessions) = app.parts();
            let submission = form.submit(api, sessions).await;
            show(&mut app, &submission).await;
        },
        Command::SignUp {
            name,
            email,
            phone_no,
            password,
        } => {
            let mut form = match app.open(Route::SignUp).await {
                Page::SignUp(form) => form,
                other => bail!("Expected the sign up page, not {}", other.route()),
            };
            form.name = name;
            form.email = email;
            form.phone_no = phone_no;
            form.password = password;

            let (api, sessions) = app.parts();
            let submission = form.submit(api, sessions).await;
            show(&mut app, &submission).await;
        },
        Command::Logout => {
            if let Some(mut navbar) = navbar(&mut app).await {
                let (_, sessions) = app.parts();
                let submission = navbar.logout(sessions);
                show(&mut app, &submission).await;
            }
        },
        Command::Rides => print!("{}", app.open(Route::Home).await.render()),
        Command::Post {
            destination,
            pickup,
            time,
        } => {
            let mut form = match app.open(Route::CreateRide).await {
                Page::CreateRide(form) => form,
                other => {
                    print!("{}", other.render());
                    return Ok(());
                },
            };
            form.destination = destination;
            form.pickup = pickup;
            form.time = time;

            let (api, _) = app.parts();
            let submission = form.submit(api).await;
            show(&mut app, &submission).await;
        },
        Command::Delete => {
            if let Some(navbar) = navbar(&mut app).await {
                let (api, _) = app.parts();
                if let DeleteOutcome::Deleted(message) =
                    navbar.delete_my_ride(api).await
                {
                    println!("{}", message);
                }
            }
        },
        Command::WhoAmI => match app.sessions().load() {
            Some(session) => {
                let who = session.identity;
                println!("Name:  {}", who.name);
                println!("Email: {}", who.email);
                println!("Phone: {}", who.phone_no);
            },
            None => println!("Not logged in"),
        },
    }

    Ok(())
}

/// Mount the navigation bar, printing wherever we ended up instead if we
/// were redirected.
async fn navbar(app: &mut Client) -> Option<NavBar> {
    match app.open_navbar().await {
        Ok(navbar) => Some(navbar),
        Err(page) => {
            print!("{}", page.render());
            None
        },
    }
}

/// Print a submission's notification and whatever page it leads to.
async fn show(app: &mut Client, submission: &Submission) {
    if let Some(ref toast) = submission.toast {
        println!("{}\n", toast);
    }

    if let Some(page) = app.follow(submission).await {
        print!("{}", page.render());
    }
}

#[derive(Debug, StructOpt)]
#[structopt(about = "Share rides with the RideShare server")]
struct Args {
    #[structopt(
        long = "api-url",
        env = "RIDESHARE_API_URL",
        help = "The RideShare server's base URL"
    )]
    api_url: Url,
    #[structopt(
        long = "state-dir",
        env = "RIDESHARE_STATE_DIR",
        parse(from_os_str),
        help = "Where to keep the session token"
    )]
    state_dir: Option<PathBuf>,
    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    #[structopt(about = "Sign in to your account")]
    Login {
        #[structopt(short = "e", long = "email", help = "Your email address")]
        email: String,
        #[structopt(short = "p", long = "password", help = "Your password")]
        password: String,
    },
    #[structopt(name = "signup", about = "Create an account")]
    SignUp {
        #[structopt(long = "name", help = "Your name")]
        name: String,
        #[structopt(long = "email", help = "Your email address")]
        email: String,
        #[structopt(long = "phone", help = "Your phone number")]
        phone_no: String,
        #[structopt(long = "password", help = "Your password")]
        password: String,
    },
    #[structopt(about = "Sign out")]
    Logout,
    #[structopt(about = "List the available rides")]
    Rides,
    #[structopt(about = "Post a ride departing today")]
    Post {
        #[structopt(short = "d", long = "destination")]
        destination: String,
        #[structopt(short = "p", long = "pickup", help = "Pickup location")]
        pickup: String,
        #[structopt(
            short = "t",
            long = "time",
            default_value = "10:00",
            help = "Departure time (HH:MM, between 09:00 and 18:00)"
        )]
        time: String,
    },
    #[structopt(about = "Delete the ride posted with your phone number")]
    Delete,
    #[structopt(name = "whoami", about = "Show who you are logged in as")]
    WhoAmI,
}
