//! Command-line front end.
//!
//! Each subcommand drives the same controller a page would: arguments fill
//! the controller's form state, the controller performs the request and
//! surfaces notices, and this module prints the resulting records as
//! tab-separated lines. Notices go to the log; records go to `out`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::client::{ApiClient, PortalApi};
use crate::config::{ConfigError, PortalSettings};
use crate::controllers::{
    AdminDashboard, LayoutDashboard, LoginController, RegistrationController, StudentDashboard,
};
use crate::domain::ports::{
    CredentialStore, CredentialStoreError, HttpTransport, Notifier, RecordingNavigator,
};
use crate::domain::{
    Application, ApplicationId, Block, BlockDraft, BlockId, DEFAULT_DISEASE_STATUS,
    DEFAULT_RESIDENCY_TYPE, Error, Rating, Residency, ResidencyDraft, ResidencyId, Review,
    ReviewId, Role, Room, RoomDraft, RoomId,
};
use crate::outbound::{FileCredentialStore, ReqwestTransport, TracingNotifier};
use crate::session::SessionContext;

/// `portal` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "portal",
    about = "Browse, manage and review university residencies",
    version
)]
pub struct Cli {
    /// Residency service root. Overrides `PORTAL_BASE_URL`.
    #[arg(long, global = true, value_name = "url")]
    pub base_url: Option<String>,
    /// Credential file. Overrides `PORTAL_CREDENTIALS_PATH`.
    #[arg(long, global = true, value_name = "path")]
    pub credentials_path: Option<PathBuf>,
    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub json_logs: bool,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an account.
    Register(RegisterArgs),
    /// Log in and store the issued token.
    Login {
        /// Account name.
        #[arg(long)]
        username: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Residency listings.
    #[command(subcommand)]
    Residencies(ResidencyCommand),
    /// Apply for a residency.
    Apply(ApplyArgs),
    /// Submitted applications.
    #[command(subcommand)]
    Applications(ApplicationCommand),
    /// Residency reviews.
    #[command(subcommand)]
    Reviews(ReviewCommand),
    /// Blocks within a residency (admin).
    #[command(subcommand)]
    Blocks(BlockCommand),
    /// Rooms within a block (admin).
    #[command(subcommand)]
    Rooms(RoomCommand),
}

/// Registration form fields.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Account name.
    #[arg(long)]
    pub username: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
    /// `admin` or `student`.
    #[arg(long, default_value_t = Role::Student)]
    pub role: Role,
    /// Given name.
    #[arg(long, default_value = "")]
    pub first_name: String,
    /// Family name.
    #[arg(long, default_value = "")]
    pub last_name: String,
    /// Year of study; students only.
    #[arg(long, default_value = "")]
    pub year_of_study: String,
    /// University; students only.
    #[arg(long, default_value = "")]
    pub university: String,
}

/// Residency subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ResidencyCommand {
    /// List every residency.
    List,
    /// Show one residency.
    Get {
        /// Residency id.
        id: String,
    },
    /// Add a residency (admin).
    Create(ResidencyFields),
    /// Change fields of a residency (admin).
    Update {
        /// Residency id.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: ResidencyPatch,
    },
    /// Remove a residency (admin).
    Delete {
        /// Residency id.
        id: String,
    },
}

/// Fields of a new residency.
#[derive(Debug, Clone, Args)]
pub struct ResidencyFields {
    /// Residency category.
    #[arg(long, default_value = DEFAULT_RESIDENCY_TYPE)]
    pub residency_type: String,
    /// City.
    #[arg(long, default_value = "")]
    pub city: String,
    /// Residency name.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Street address.
    #[arg(long, default_value = "")]
    pub address: String,
    /// Contact number.
    #[arg(long, default_value = "")]
    pub telephone: String,
    /// Nearby transport.
    #[arg(long, default_value = "")]
    pub transportation: String,
}

impl From<ResidencyFields> for ResidencyDraft {
    fn from(fields: ResidencyFields) -> Self {
        Self {
            residency_type: fields.residency_type,
            city: fields.city,
            name: fields.name,
            address: fields.address,
            telephone: fields.telephone,
            available_transportation: fields.transportation,
        }
    }
}

/// Residency fields to overwrite; omitted flags keep the current value.
#[derive(Debug, Clone, Default, Args)]
pub struct ResidencyPatch {
    /// Residency category.
    #[arg(long)]
    pub residency_type: Option<String>,
    /// City.
    #[arg(long)]
    pub city: Option<String>,
    /// Residency name.
    #[arg(long)]
    pub name: Option<String>,
    /// Street address.
    #[arg(long)]
    pub address: Option<String>,
    /// Contact number.
    #[arg(long)]
    pub telephone: Option<String>,
    /// Nearby transport.
    #[arg(long)]
    pub transportation: Option<String>,
}

impl ResidencyPatch {
    fn apply_to(self, draft: &mut ResidencyDraft) {
        let pairs = [
            (self.residency_type, &mut draft.residency_type),
            (self.city, &mut draft.city),
            (self.name, &mut draft.name),
            (self.address, &mut draft.address),
            (self.telephone, &mut draft.telephone),
            (self.transportation, &mut draft.available_transportation),
        ];
        for (value, field) in pairs {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

/// Application form fields.
#[derive(Debug, Clone, Args)]
pub struct ApplyArgs {
    /// Residency to apply for.
    #[arg(long)]
    pub residency_id: String,
    /// Preferred roommate, if any.
    #[arg(long, default_value = "")]
    pub preferred_roommate: String,
    /// Health status.
    #[arg(long, default_value = DEFAULT_DISEASE_STATUS)]
    pub disease_status: String,
}

/// Application subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ApplicationCommand {
    /// List every submitted application (admin).
    List,
    /// Show one application (admin).
    Get {
        /// Application id.
        id: String,
    },
    /// Withdraw an application.
    Delete {
        /// Application id.
        id: String,
    },
}

/// Review subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ReviewCommand {
    /// List your reviews.
    List,
    /// Review a residency.
    Create {
        /// Residency under review.
        #[arg(long)]
        residency_id: String,
        /// Stars from 1 to 5.
        #[arg(long, default_value = "5", value_parser = parse_rating)]
        rating: Rating,
        /// Review text.
        #[arg(long)]
        text: String,
    },
    /// Show one review (admin).
    Get {
        /// Review id.
        id: String,
    },
    /// Delete one of your reviews.
    Delete {
        /// Review id.
        id: String,
    },
}

/// Block subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum BlockCommand {
    /// List the blocks of a residency.
    List {
        /// Parent residency.
        #[arg(long)]
        residency_id: String,
    },
    /// Show one block.
    Get {
        /// Block id.
        id: String,
    },
    /// Add a block to a residency.
    Create {
        /// Parent residency.
        #[arg(long)]
        residency_id: String,
        /// Block fields.
        #[command(flatten)]
        fields: BlockFields,
    },
    /// Change fields of a block.
    Update {
        /// Block id.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: BlockPatch,
    },
    /// Remove a block.
    Delete {
        /// Block id.
        id: String,
    },
}

/// Fields of a new block.
#[derive(Debug, Clone, Args)]
pub struct BlockFields {
    /// Block name.
    #[arg(long, default_value = "")]
    pub name: String,
    /// Storeys in the block.
    #[arg(long, default_value_t = 1)]
    pub floors: u32,
    /// Rooms across all floors.
    #[arg(long, default_value_t = 0)]
    pub rooms: u32,
}

impl From<BlockFields> for BlockDraft {
    fn from(fields: BlockFields) -> Self {
        Self {
            block_name: fields.name,
            number_of_floors: fields.floors,
            total_rooms: fields.rooms,
        }
    }
}

/// Block fields to overwrite; omitted flags keep the current value.
#[derive(Debug, Clone, Default, Args)]
pub struct BlockPatch {
    /// Block name.
    #[arg(long)]
    pub name: Option<String>,
    /// Storeys in the block.
    #[arg(long)]
    pub floors: Option<u32>,
    /// Rooms across all floors.
    #[arg(long)]
    pub rooms: Option<u32>,
}

impl BlockPatch {
    fn apply_to(self, draft: &mut BlockDraft) {
        if let Some(name) = self.name {
            draft.block_name = name;
        }
        if let Some(floors) = self.floors {
            draft.number_of_floors = floors;
        }
        if let Some(rooms) = self.rooms {
            draft.total_rooms = rooms;
        }
    }
}

/// Room subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum RoomCommand {
    /// List the rooms of a block.
    List {
        /// Parent block.
        #[arg(long)]
        block_id: String,
    },
    /// Show one room.
    Get {
        /// Room id.
        id: String,
    },
    /// Add a room to a block.
    Create {
        /// Parent block.
        #[arg(long)]
        block_id: String,
        /// Room fields.
        #[command(flatten)]
        fields: RoomFields,
    },
    /// Change fields of a room.
    Update {
        /// Room id.
        id: String,
        /// Fields to change.
        #[command(flatten)]
        fields: RoomPatch,
    },
    /// Remove a room.
    Delete {
        /// Room id.
        id: String,
    },
}

/// Fields of a new room.
#[derive(Debug, Clone, Args)]
pub struct RoomFields {
    /// Door number.
    #[arg(long, default_value = "")]
    pub number: String,
    /// Floor the room is on.
    #[arg(long, default_value_t = 0)]
    pub floor: u32,
    /// Beds in the room.
    #[arg(long, default_value_t = 1)]
    pub capacity: u32,
    /// Create the room as not allocatable.
    #[arg(long)]
    pub unavailable: bool,
}

impl From<RoomFields> for RoomDraft {
    fn from(fields: RoomFields) -> Self {
        Self {
            room_number: fields.number,
            floor: fields.floor,
            capacity: fields.capacity,
            is_available: !fields.unavailable,
        }
    }
}

/// Room fields to overwrite; omitted flags keep the current value.
#[derive(Debug, Clone, Default, Args)]
pub struct RoomPatch {
    /// Door number.
    #[arg(long)]
    pub number: Option<String>,
    /// Floor the room is on.
    #[arg(long)]
    pub floor: Option<u32>,
    /// Beds in the room.
    #[arg(long)]
    pub capacity: Option<u32>,
    /// `true` or `false`.
    #[arg(long)]
    pub available: Option<bool>,
}

impl RoomPatch {
    fn apply_to(self, draft: &mut RoomDraft) {
        if let Some(number) = self.number {
            draft.room_number = number;
        }
        if let Some(floor) = self.floor {
            draft.floor = floor;
        }
        if let Some(capacity) = self.capacity {
            draft.capacity = capacity;
        }
        if let Some(available) = self.available {
            draft.is_available = available;
        }
    }
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|error| format!("invalid rating '{raw}': {error}"))?;
    Rating::new(value).map_err(|error| error.to_string())
}

/// Errors that end a CLI invocation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The credential file location is unusable.
    #[error("credential store unavailable: {0}")]
    Store(#[from] CredentialStoreError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    /// The operation failed; its notice has already been logged.
    #[error(transparent)]
    Portal(#[from] Error),
    /// Writing results failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// An argument named something that does not exist.
    #[error("{0}")]
    InvalidArgument(String),
}

/// Wired controllers sharing one session.
pub struct Portal {
    api: PortalApi,
    session: SessionContext,
    navigator: Arc<RecordingNavigator>,
}

impl Portal {
    /// Wire the controllers over the given adapters.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let navigator = Arc::new(RecordingNavigator::new());
        let session = SessionContext::new(store, navigator.clone(), notifier);
        let api = PortalApi::new(ApiClient::with_session(transport, &session));
        Self {
            api,
            session,
            navigator,
        }
    }

    /// Wire the production adapters described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when a setting is invalid or an adapter cannot
    /// be constructed.
    pub fn from_settings(settings: &PortalSettings) -> Result<Self, CliError> {
        let store = FileCredentialStore::new(settings.credentials_path())?;
        let transport = ReqwestTransport::new(settings.base_url()?, settings.request_timeout()?)?;
        debug!(base_url = %transport.base_url(), credentials = %store.path().display(), "portal wired");
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(store),
            Arc::new(TracingNotifier),
        ))
    }

    /// Run one command, writing records and any redirect to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Portal`] when the operation failed and
    /// [`CliError::Output`] when `out` cannot be written.
    pub async fn execute(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        let visited = self.navigator.history().len();
        let outcome = self.dispatch(command, out).await;
        let history = self.navigator.history();
        if let Some(route) = history.get(visited..).and_then(<[_]>::last) {
            writeln!(out, "redirect\t{route}")?;
        }
        outcome
    }

    async fn dispatch(&self, command: Command, out: &mut impl Write) -> Result<(), CliError> {
        match command {
            Command::Register(args) => self.register(args).await,
            Command::Login { username, password } => {
                LoginController::new(self.api.clone(), self.session.clone())
                    .login(&username, &password)
                    .await?;
                Ok(())
            }
            Command::Logout => {
                self.session.logout()?;
                Ok(())
            }
            Command::Residencies(command) => self.residencies(command, out).await,
            Command::Apply(args) => self.apply(args).await,
            Command::Applications(command) => self.applications(command, out).await,
            Command::Reviews(command) => self.reviews(command, out).await,
            Command::Blocks(command) => self.blocks(command, out).await,
            Command::Rooms(command) => self.rooms(command, out).await,
        }
    }

    async fn register(&self, args: RegisterArgs) -> Result<(), CliError> {
        let mut controller = RegistrationController::new(self.api.clone(), self.session.clone());
        controller.set_role(args.role);
        let form = controller.form_mut();
        form.username = args.username;
        form.password = args.password;
        form.first_name = args.first_name;
        form.last_name = args.last_name;
        form.year_of_study = args.year_of_study;
        form.university = args.university;
        controller.submit().await?;
        Ok(())
    }

    async fn residencies(
        &self,
        command: ResidencyCommand,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match command {
            ResidencyCommand::List => {
                let listed = if self.is_admin() {
                    let mut admin = self.admin();
                    admin.fetch_all().await?;
                    admin.residencies().to_vec()
                } else {
                    let mut student = self.student();
                    student.fetch_all().await?;
                    student.residencies().to_vec()
                };
                write_residencies(out, &listed)
            }
            ResidencyCommand::Get { id } => {
                let found = if self.is_admin() {
                    let mut admin = self.admin();
                    admin.set_search_id(id);
                    admin.search().await?;
                    admin.residencies().to_vec()
                } else {
                    let mut student = self.student();
                    student.set_search_id(id);
                    student.search().await?;
                    student.residencies().to_vec()
                };
                write_residencies(out, &found)
            }
            ResidencyCommand::Create(fields) => {
                let mut admin = self.admin();
                *admin.draft_mut() = fields.into();
                admin.add().await?;
                Ok(())
            }
            ResidencyCommand::Update { id, fields } => {
                let residency = parse_id(ResidencyId::new(id))?;
                let mut admin = self.admin();
                admin.fetch_all().await?;
                if !admin.start_edit(&residency) {
                    return Err(CliError::InvalidArgument(format!(
                        "no residency with id {residency}"
                    )));
                }
                if let Some(scratch) = admin.edit_form_mut() {
                    fields.apply_to(scratch);
                }
                admin.save_edit().await?;
                Ok(())
            }
            ResidencyCommand::Delete { id } => {
                let residency = parse_id(ResidencyId::new(id))?;
                self.admin().delete(&residency).await?;
                Ok(())
            }
        }
    }

    async fn apply(&self, args: ApplyArgs) -> Result<(), CliError> {
        let mut student = self.student();
        let draft = student.application_mut();
        draft.residency_id = args.residency_id;
        draft.preferred_roommate = args.preferred_roommate;
        draft.disease_status = args.disease_status;
        student.apply().await?;
        Ok(())
    }

    async fn applications(
        &self,
        command: ApplicationCommand,
        out: &mut impl Write,
    ) -> Result<(), CliError> {
        match command {
            ApplicationCommand::List => {
                let mut admin = self.admin();
                admin.list_applications().await?;
                write_applications(out, admin.applications())
            }
            ApplicationCommand::Get { id } => {
                let application = parse_id(ApplicationId::new(id))?;
                let mut admin = self.admin();
                admin.view_application(&application).await?;
                write_applications(out, admin.application_detail())
            }
            ApplicationCommand::Delete { id } => {
                let application = parse_id(ApplicationId::new(id))?;
                self.student().withdraw_application(&application).await?;
                Ok(())
            }
        }
    }

    async fn reviews(&self, command: ReviewCommand, out: &mut impl Write) -> Result<(), CliError> {
        let mut student = self.student();
        match command {
            ReviewCommand::List => {
                student.fetch_reviews().await?;
                write_reviews(out, student.reviews())
            }
            ReviewCommand::Create {
                residency_id,
                rating,
                text,
            } => {
                let draft = student.review_mut();
                draft.residency_id = residency_id;
                draft.rating = rating;
                draft.review_text = text;
                student.submit_review().await?;
                Ok(())
            }
            ReviewCommand::Get { id } => {
                let review = parse_id(ReviewId::new(id))?;
                let mut admin = self.admin();
                admin.view_review(&review).await?;
                write_reviews(out, admin.review_detail())
            }
            ReviewCommand::Delete { id } => {
                let review = parse_id(ReviewId::new(id))?;
                student.delete_review(&review).await?;
                Ok(())
            }
        }
    }

    async fn blocks(&self, command: BlockCommand, out: &mut impl Write) -> Result<(), CliError> {
        let mut layout = self.layout();
        match command {
            BlockCommand::List { residency_id } => {
                layout
                    .open_residency(parse_id(ResidencyId::new(residency_id))?)
                    .await?;
                write_blocks(out, layout.blocks())
            }
            BlockCommand::Get { id } => {
                let block = layout.find_block(&parse_id(BlockId::new(id))?).await?;
                write_blocks(out, [&block])
            }
            BlockCommand::Create {
                residency_id,
                fields,
            } => {
                layout.select_residency(parse_id(ResidencyId::new(residency_id))?);
                *layout.block_draft_mut() = fields.into();
                layout.add_block().await?;
                Ok(())
            }
            BlockCommand::Update { id, fields } => {
                let block = parse_id(BlockId::new(id))?;
                let current = layout.find_block(&block).await?;
                let draft = layout.block_draft_mut();
                *draft = BlockDraft::from(&current);
                fields.apply_to(draft);
                layout.update_block(&block).await?;
                Ok(())
            }
            BlockCommand::Delete { id } => {
                layout.delete_block(&parse_id(BlockId::new(id))?).await?;
                Ok(())
            }
        }
    }

    async fn rooms(&self, command: RoomCommand, out: &mut impl Write) -> Result<(), CliError> {
        let mut layout = self.layout();
        match command {
            RoomCommand::List { block_id } => {
                layout.open_block(parse_id(BlockId::new(block_id))?).await?;
                write_rooms(out, layout.rooms())
            }
            RoomCommand::Get { id } => {
                let room = layout.find_room(&parse_id(RoomId::new(id))?).await?;
                write_rooms(out, [&room])
            }
            RoomCommand::Create { block_id, fields } => {
                layout.select_block(parse_id(BlockId::new(block_id))?);
                *layout.room_draft_mut() = fields.into();
                layout.add_room().await?;
                Ok(())
            }
            RoomCommand::Update { id, fields } => {
                let room = parse_id(RoomId::new(id))?;
                let current = layout.find_room(&room).await?;
                let draft = layout.room_draft_mut();
                *draft = RoomDraft::from(&current);
                fields.apply_to(draft);
                layout.update_room(&room).await?;
                Ok(())
            }
            RoomCommand::Delete { id } => {
                layout.delete_room(&parse_id(RoomId::new(id))?).await?;
                Ok(())
            }
        }
    }

    fn admin(&self) -> AdminDashboard {
        AdminDashboard::new(self.api.clone(), self.session.clone())
    }

    fn student(&self) -> StudentDashboard {
        StudentDashboard::new(self.api.clone(), self.session.clone())
    }

    fn layout(&self) -> LayoutDashboard {
        LayoutDashboard::new(self.api.clone(), self.session.clone())
    }

    /// Whether the stored token claims the admin role.
    fn is_admin(&self) -> bool {
        match self.session.token() {
            Ok(token) => token
                .and_then(|token| token.claims())
                .and_then(|claims| claims.role)
                .is_some_and(|role| role == Role::Admin),
            Err(error) => {
                debug!(%error, "stored credential unreadable; using the student view");
                false
            }
        }
    }
}

/// Load settings, apply the flags in `cli` and run its command.
///
/// # Errors
///
/// Returns [`CliError`] when wiring or the command fails.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let settings =
        PortalSettings::load_ambient()?.with_overrides(cli.base_url, cli.credentials_path);
    let portal = Portal::from_settings(&settings)?;
    portal.execute(cli.command, out).await
}

fn parse_id<T, E: std::fmt::Display>(parsed: Result<T, E>) -> Result<T, CliError> {
    parsed.map_err(|error| CliError::InvalidArgument(error.to_string()))
}

fn write_residencies(out: &mut impl Write, residencies: &[Residency]) -> Result<(), CliError> {
    for residency in residencies {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            residency.id,
            residency.name,
            residency.city,
            residency.address,
            residency.telephone,
            residency.residency_type,
            residency.available_transportation.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

fn write_reviews<'a>(
    out: &mut impl Write,
    reviews: impl IntoIterator<Item = &'a Review>,
) -> Result<(), CliError> {
    for review in reviews {
        let created = review
            .created_at()
            .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d").to_string());
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            review.id,
            review.residency_id,
            review.rating.get(),
            created,
            review.review_text,
        )?;
    }
    Ok(())
}

fn write_blocks<'a>(
    out: &mut impl Write,
    blocks: impl IntoIterator<Item = &'a Block>,
) -> Result<(), CliError> {
    for block in blocks {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            block.id, block.residency_id, block.block_name, block.number_of_floors, block.total_rooms,
        )?;
    }
    Ok(())
}

fn write_rooms<'a>(
    out: &mut impl Write,
    rooms: impl IntoIterator<Item = &'a Room>,
) -> Result<(), CliError> {
    for room in rooms {
        let availability = if room.is_available { "available" } else { "unavailable" };
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            room.id, room.block_id, room.room_number, room.floor, room.capacity, availability,
        )?;
    }
    Ok(())
}

fn write_applications<'a>(
    out: &mut impl Write,
    applications: impl IntoIterator<Item = &'a Application>,
) -> Result<(), CliError> {
    for application in applications {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            application.id,
            application.username,
            application.residency_id,
            application.status,
            application.disease_status,
        )?;
    }
    Ok(())
}
