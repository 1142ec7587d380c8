use anyhow::Result;
use clap::{Parser, Subcommand};

use adpilot::cli::{self, OutputFormat};
use adpilot::wizard::CampaignForm;

#[derive(Debug, Parser)]
#[command(name = "adpilot")]
#[command(about = "Campaign dashboard with simulated AI insights")]
struct App {
    /// Skip every simulated delay
    #[arg(long, global = true)]
    instant: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a campaign description: sentiment, intent, entities
    Analyze {
        /// The text to analyze
        #[arg(trailing_var_arg = true, required = true)]
        text: Vec<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Estimate audience reach for a number of filters
    Estimate {
        #[arg(long, default_value = "0")]
        filters: usize,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Run the campaign wizard and deploy the result
    Deploy {
        #[arg(long, default_value = "")]
        name: String,
        /// Ad platform, e.g. "Google Ads"
        #[arg(long, default_value = "")]
        platform: String,
        /// brand_awareness, lead_generation, conversions, traffic, engagement
        #[arg(long, default_value = "")]
        objective: String,
        /// Daily budget in dollars
        #[arg(long, default_value = "")]
        budget: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List campaigns
    Campaigns {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List uploaded assets
    Assets {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Upload files as assets
    Upload {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Save an audience built from the default filters
    Audience {
        /// Add this many random filters before saving
        #[arg(long, default_value = "0")]
        extra: usize,
    },
    /// Generate an ad creative from a prompt
    Creative {
        #[arg(trailing_var_arg = true, required = true)]
        prompt: Vec<String>,
        #[arg(long)]
        style: Option<String>,
        /// Creative format, e.g. "Story (9:16)"
        #[arg(long = "size")]
        size: Option<String>,
    },
    /// Export the campaign performance report
    Export {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Render a dashboard section as JSON
    Section {
        /// dashboard, campaigns, assets, audience, creative, analytics
        name: String,
    },
    /// Show or change the theme: show, toggle, light, dark
    Theme { action: Option<String> },
    /// Show recent activity log entries
    Activity {
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Minimum level: debug, info, warn, error
        #[arg(long)]
        level: Option<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Serve the web dashboard
    Web {
        /// Bind address (default from config)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Set a value, e.g. `general.theme dark`
    Set { key: String, value: String },
    /// Reset the config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();
    let fmt = |format: &str| OutputFormat::from_str_opt(Some(format));

    match app.command {
        Commands::Analyze { text, format } => {
            let mut platform = cli::platform(app.instant);
            cli::run_analyze(&mut platform, &text.join(" "), fmt(&format))
        }
        Commands::Estimate { filters, format } => cli::run_estimate(filters, fmt(&format)),
        Commands::Deploy {
            name,
            platform: ad_platform,
            objective,
            budget,
            description,
        } => {
            let mut platform = cli::platform(app.instant);
            let form = CampaignForm {
                name,
                platform: ad_platform,
                objective,
                budget,
                description,
            };
            cli::run_deploy(&mut platform, form)
        }
        Commands::Campaigns { format } => {
            cli::run_campaigns(&cli::platform(app.instant), fmt(&format))
        }
        Commands::Assets { format } => cli::run_assets(&cli::platform(app.instant), fmt(&format)),
        Commands::Upload { paths } => {
            let mut platform = cli::platform(app.instant);
            cli::run_upload(&mut platform, &paths)
        }
        Commands::Audience { extra } => {
            let mut platform = cli::platform(app.instant);
            cli::run_audience(&mut platform, extra)
        }
        Commands::Creative {
            prompt,
            style,
            size,
        } => {
            let mut platform = cli::platform(app.instant);
            cli::run_creative(&mut platform, &prompt.join(" "), style, size)
        }
        Commands::Export { format } => {
            let mut platform = cli::platform(app.instant);
            cli::run_export(&mut platform, fmt(&format))
        }
        Commands::Section { name } => {
            let mut platform = cli::platform(app.instant);
            cli::run_section(&mut platform, &name)
        }
        Commands::Theme { action } => {
            let mut platform = cli::platform(app.instant);
            cli::run_theme(&mut platform, action.as_deref())
        }
        Commands::Activity {
            limit,
            level,
            format,
        } => cli::run_activity(
            &cli::platform(app.instant),
            limit,
            level.as_deref(),
            fmt(&format),
        ),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
        Commands::Web { addr, no_open } => {
            cli::run_web(cli::platform(app.instant), addr, no_open)
        }
    }
}
