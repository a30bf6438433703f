//! Command implementations for the stats CLI.
//!
//! Each command fetches a stats response from a running server (or reads a
//! saved one), reshapes it exactly like the dashboards do, and prints the
//! resulting charts and legends.

use clap::Subcommand;

pub mod fetch;
pub mod report;

#[derive(Subcommand)]
pub enum Command {
    /// Reshape program-wide stats as the admin dashboard does
    Program {
        /// Base URL of the stats server, e.g. http://localhost:5000
        #[arg(short, long, default_value = "http://localhost:5000")]
        server: String,

        /// Number of weeks to include, counting the current one
        #[arg(short, long, default_value_t = 4)]
        weeks_back: u32,

        /// Read a saved response instead of fetching one
        #[arg(short, long)]
        input: Option<String>,

        /// Print the full plan as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Reshape the stats of one class as the class dashboard does
    Class {
        /// Base URL of the stats server, e.g. http://localhost:5000
        #[arg(short, long, default_value = "http://localhost:5000")]
        server: String,

        /// Class id
        #[arg(short, long)]
        class_id: String,

        /// Number of weeks to include, counting the current one
        #[arg(short, long, default_value_t = 4)]
        weeks_back: u32,

        /// Read a saved response instead of fetching one
        #[arg(short, long)]
        input: Option<String>,

        /// Print the full plan as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Program {
            server,
            weeks_back,
            input,
            json,
        } => {
            let plan = fetch::program_plan(&server, weeks_back, input.as_deref()).await?;
            report::print(&plan, json)
        }
        Command::Class {
            server,
            class_id,
            weeks_back,
            input,
            json,
        } => {
            let plan = fetch::class_plan(&server, &class_id, weeks_back, input.as_deref()).await?;
            report::print(&plan, json)
        }
    }
}
