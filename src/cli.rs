use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "remotodo")]
#[command(about = "A terminal to-do list backed by a remote todos API", long_about = None)]
pub struct Cli {
    /// Base URL of the todos API (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add { title: String },
    /// Print tasks
    List {
        /// all, completed or pending
        #[arg(short, long, default_value = "all")]
        filter: String,
    },
    /// Toggle a task's completion state by id
    Done { id: i64 },
    /// Delete a task by id
    Rm { id: i64 },
}
