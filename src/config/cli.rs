use clap::{Args, Subcommand};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the proxy API server
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,

        /// Upstream base URL for every resource (overrides upstream.base_url)
        #[arg(long)]
        upstream: Option<String>,
    },

    /// Manage clients
    #[command(subcommand)]
    Clients(ClientsCommand),

    /// Browse ISO-8583 standard field definitions
    #[command(subcommand)]
    Standards(StandardsCommand),

    /// Manage field mappings
    #[command(subcommand)]
    Mappings(MappingsCommand),
}

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Rows per page, 0 shows everything (defaults to console.page_size)
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ClientsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,

        /// all, active or inactive
        #[arg(long, default_value = "all")]
        status: String,

        #[command(flatten)]
        paging: PageArgs,
    },
    Create {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        iso_version: String,
        #[arg(long)]
        encoding: String,
        #[arg(long)]
        bitmap_type: String,
        #[arg(long, default_value = "Y")]
        active: String,
    },
    Update {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        iso_version: Option<String>,
        #[arg(long)]
        encoding: Option<String>,
        #[arg(long)]
        bitmap_type: Option<String>,
        #[arg(long)]
        active: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StandardsCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum MappingsCommand {
    List {
        /// Client ID whose mappings should be loaded
        #[arg(long)]
        client: String,

        #[arg(long, default_value = "")]
        search: String,

        #[command(flatten)]
        paging: PageArgs,
    },
    Create {
        #[arg(long)]
        client: String,

        /// ISO standard record id
        #[arg(long)]
        iso_field: String,

        #[arg(long)]
        client_field: String,

        #[arg(long)]
        direction: String,

        #[arg(long)]
        transformation: Option<String>,

        #[arg(long)]
        default_value: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: String,

        #[arg(long)]
        yes: bool,
    },
}
