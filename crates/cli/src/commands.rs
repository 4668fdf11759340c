//! CLI commands

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use household_core::{
    ClientConfig, FileSessionStore, NavigationIntent, RecordingNavigator, Resolution, Role,
    RouteTable, SessionStore,
};
use household_http::ApiClient;
use household_http::types::{
    Credentials, DocumentUpload, RegisterForm, ServiceData, ServiceRequestData,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect the client route table
    Routes {
        #[command(subcommand)]
        command: RouteCommands,
    },

    /// Log in and keep the issued tokens in the session file
    Login {
        role: Role,
        username: String,
        password: String,
    },

    /// Log out of a role
    Logout { role: Role },

    /// Exchange the stored refresh token for a new access token
    Refresh { role: Role },

    /// Register a customer or professional account
    Register(RegisterArgs),

    /// Show the roles holding a session
    Whoami,

    /// Fetch the landing page content
    Home,

    /// Download an uploaded document
    Document {
        filename: String,

        /// Output file (defaults to the document name)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Admin endpoints
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Customer endpoints
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },

    /// Professional endpoints
    Professional {
        #[command(subcommand)]
        command: ProfessionalCommands,
    },
}

#[derive(Subcommand)]
pub enum RouteCommands {
    /// List every route with its access metadata
    List,

    /// Resolve a path to its view
    Resolve { path: String },

    /// Build the path of a named route from `key=value` parameters
    Href { name: String, params: Vec<String> },
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    role: Role,
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone_number: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    pin_code: String,
    #[arg(long)]
    address: String,

    /// Field of expertise (professionals)
    #[arg(long)]
    expertise: Option<String>,

    /// Verification document to upload (professionals)
    #[arg(long)]
    document: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServiceArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: f64,
    /// Hours needed to complete the service
    #[arg(long)]
    time_required: Option<f64>,
    #[arg(long)]
    description: String,
    #[arg(long)]
    field_of_service: Option<String>,
}

impl From<ServiceArgs> for ServiceData {
    fn from(args: ServiceArgs) -> Self {
        Self {
            name: args.name,
            price: args.price,
            time_required: args.time_required,
            description: args.description,
            field_of_service: args.field_of_service,
        }
    }
}

#[derive(Subcommand)]
pub enum AdminCommands {
    Dashboard,
    /// List customers
    Customers {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List professionals
    Professionals {
        #[arg(long, default_value = "")]
        search: String,
    },
    Block { id: i64 },
    Unblock { id: i64 },
    /// Approve a professional
    Approve { id: i64 },
    /// Withdraw a professional's approval
    Unapprove { id: i64 },
    Services,
    CreateService(ServiceArgs),
    UpdateService {
        id: i64,
        #[command(flatten)]
        service: ServiceArgs,
    },
    DeleteService { id: i64 },
    /// Start a CSV export of closed requests
    ExportClosed,
}

#[derive(Subcommand)]
pub enum CustomerCommands {
    Dashboard,
    /// Services and locations available for a new request
    CreateRequest,
    Search { query: String },
    /// Request a service
    Request {
        service_id: i64,
        #[arg(long)]
        location: String,
        #[arg(long)]
        pin_code: String,
    },
    Requests,
    /// Update the remarks of a request
    Update { id: i64, remarks: String },
    /// Close a request with a rating from 1 to 5
    Close {
        id: i64,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
    },
}

#[derive(Subcommand)]
pub enum ProfessionalCommands {
    Dashboard,
    /// Start a CSV export of pending requests
    Export,
    /// Download the latest export
    Download {
        #[arg(short, long, default_value = "export.csv")]
        out: PathBuf,
    },
    Pending,
    Accept { id: i64 },
    Reject { id: i64 },
    Accepted,
    /// Set the status of an accepted request
    Status { id: i64, status: String },
}

/// Client wired to the persisted session, plus a record of where the
/// application would have navigated
struct Session {
    client: ApiClient,
    store: Arc<FileSessionStore>,
    navigator: Arc<RecordingNavigator>,
}

impl Session {
    fn open(config: &ClientConfig) -> Result<Self> {
        let store = Arc::new(
            FileSessionStore::open(&config.session_file).with_context(|| {
                format!("failed to open session file {}", config.session_file.display())
            })?,
        );
        let navigator = Arc::new(RecordingNavigator::new());
        let client = ApiClient::builder()
            .config(config)
            .session_store(store.clone())
            .navigator(navigator.clone())
            .build()?;

        Ok(Self {
            client,
            store,
            navigator,
        })
    }

    /// Print the notices and the final view the client asked for
    fn report(&self, routes: &RouteTable) {
        for intent in self.navigator.intents() {
            match intent {
                NavigationIntent::Notify(message) => eprintln!("notice: {message}"),
                NavigationIntent::Navigate(path) => match routes.resolve(&path) {
                    Resolution::Matched(matched) => {
                        eprintln!("next view: {} ({path})", matched.entry.name);
                    }
                    _ => eprintln!("next view: {path}"),
                },
            }
        }
    }
}

impl Commands {
    pub async fn execute(self, config: ClientConfig) -> Result<()> {
        let routes = RouteTable::standard();

        if let Self::Routes { command } = self {
            return command.execute(&routes, &config);
        }

        let session = Session::open(&config)?;
        let result = self.run(&session).await;
        session.report(&routes);
        result
    }

    async fn run(self, session: &Session) -> Result<()> {
        let client = &session.client;
        match self {
            Self::Routes { .. } => Ok(()),
            Self::Login {
                role,
                username,
                password,
            } => {
                client
                    .login(role, &Credentials { username, password })
                    .await?;
                println!("Logged in as {role}");
                Ok(())
            }
            Self::Logout { role } => print_json(&client.logout(role).await?),
            Self::Refresh { role } => {
                client.refresh_token(role).await?;
                println!("Refreshed {role} session");
                Ok(())
            }
            Self::Register(args) => print_json(&client.register(&args.into_form()?).await?),
            Self::Whoami => {
                let roles = session.store.active_roles();
                if roles.is_empty() {
                    println!("No active sessions");
                }
                for role in roles {
                    println!("{role}");
                }
                Ok(())
            }
            Self::Home => print_json(&client.home().await?),
            Self::Document { filename, out } => {
                let out = match out {
                    Some(out) => out,
                    None => document_output(&filename)?,
                };
                let content = client.document(&filename).await?;
                write_file(&out, &content)
            }
            Self::Admin { command } => command.execute(client).await,
            Self::Customer { command } => command.execute(client).await,
            Self::Professional { command } => command.execute(client).await,
        }
    }
}

impl RouteCommands {
    fn execute(self, routes: &RouteTable, config: &ClientConfig) -> Result<()> {
        match self {
            Self::List => {
                for entry in routes.iter() {
                    let access = match (entry.meta.requires_auth, entry.meta.role) {
                        (false, _) => "public".to_string(),
                        (true, Some(role)) => format!("{role} only"),
                        (true, None) => "any session".to_string(),
                    };
                    println!("{:<34} {:<22} {access}", entry.path, entry.name);
                }
                Ok(())
            }
            Self::Resolve { path } => match routes.resolve(&path) {
                Resolution::Matched(matched) => {
                    let store = FileSessionStore::open(&config.session_file)?;
                    let allowed = matched.entry.meta.permits(&store.active_roles());
                    println!("view: {:?}", matched.entry.view);
                    println!("name: {}", matched.entry.name);
                    for (key, value) in &matched.params {
                        println!("param {key}: {value}");
                    }
                    println!("allowed: {allowed}");
                    Ok(())
                }
                Resolution::Redirect(to) => {
                    println!("redirect: {to}");
                    Ok(())
                }
                Resolution::NotFound => bail!("no route matches {path}"),
            },
            Self::Href { name, params } => {
                let pairs = params
                    .iter()
                    .map(|param| {
                        param
                            .split_once('=')
                            .with_context(|| format!("expected key=value, got {param}"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                println!("{}", routes.href(&name, &pairs)?);
                Ok(())
            }
        }
    }
}

impl AdminCommands {
    async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            Self::Dashboard => print_json(&client.admin_dashboard().await?),
            Self::Customers { search } => print_json(&client.customers(&search).await?),
            Self::Professionals { search } => print_json(&client.professionals(&search).await?),
            Self::Block { id } => print_json(&client.block_user(id).await?),
            Self::Unblock { id } => print_json(&client.unblock_user(id).await?),
            Self::Approve { id } => print_json(&client.approve_professional(id).await?),
            Self::Unapprove { id } => print_json(&client.unapprove_professional(id).await?),
            Self::Services => print_json(&client.services().await?),
            Self::CreateService(service) => {
                print_json(&client.create_service(&service.into()).await?)
            }
            Self::UpdateService { id, service } => {
                print_json(&client.update_service(id, &service.into()).await?)
            }
            Self::DeleteService { id } => print_json(&client.delete_service(id).await?),
            Self::ExportClosed => print_json(&client.export_closed_requests().await?),
        }
    }
}

impl CustomerCommands {
    async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            Self::Dashboard => print_json(&client.customer_dashboard().await?),
            Self::CreateRequest => print_json(&client.create_request_data().await?),
            Self::Search { query } => print_json(&client.search_services(&query).await?),
            Self::Request {
                service_id,
                location,
                pin_code,
            } => {
                let data = ServiceRequestData {
                    service_id,
                    location,
                    pin_code,
                };
                print_json(&client.request_service(&data).await?)
            }
            Self::Requests => print_json(&client.service_requests().await?),
            Self::Update { id, remarks } => print_json(&client.update_request(id, &remarks).await?),
            Self::Close { id, rating } => print_json(&client.close_request(id, rating).await?),
        }
    }
}

impl ProfessionalCommands {
    async fn execute(self, client: &ApiClient) -> Result<()> {
        match self {
            Self::Dashboard => print_json(&client.professional_dashboard().await?),
            Self::Export => print_json(&client.export_pending_requests().await?),
            Self::Download { out } => write_file(&out, &client.download_export().await?),
            Self::Pending => print_json(&client.pending_requests().await?),
            Self::Accept { id } => print_json(&client.accept_service(id).await?),
            Self::Reject { id } => print_json(&client.reject_service(id).await?),
            Self::Accepted => print_json(&client.accepted_requests().await?),
            Self::Status { id, status } => {
                print_json(&client.update_service_status(id, &status).await?)
            }
        }
    }
}

impl RegisterArgs {
    fn into_form(self) -> Result<RegisterForm> {
        if self.role == Role::Admin {
            bail!("admin accounts cannot be registered");
        }

        let document = self.document.as_deref().map(read_document).transpose()?;

        Ok(RegisterForm {
            username: self.username,
            password: self.password,
            role: self.role,
            email: self.email,
            phone_number: self.phone_number,
            location: self.location,
            pin_code: self.pin_code,
            address: self.address,
            expertise: self.expertise,
            document,
        })
    }
}

fn read_document(path: &Path) -> Result<DocumentUpload> {
    let content = std::fs::read(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid document path {}", path.display()))?
        .to_string();

    let mime_type = match path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => Some("application/pdf"),
        Some("png") => Some("image/png"),
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        _ => None,
    };

    Ok(DocumentUpload {
        file_name,
        content: content.into(),
        mime_type: mime_type.map(str::to_string),
    })
}

/// Default download target: the document's own name in the working directory
fn document_output(filename: &str) -> Result<PathBuf> {
    Path::new(filename)
        .file_name()
        .map(PathBuf::from)
        .with_context(|| format!("cannot derive an output file from {filename}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "Saved download");
    println!("Saved {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_output_stays_in_working_directory() {
        assert_eq!(document_output("id.pdf").unwrap(), PathBuf::from("id.pdf"));
        assert_eq!(
            document_output("../../etc/id.pdf").unwrap(),
            PathBuf::from("id.pdf")
        );
        assert!(document_output("..").is_err());
    }
}
