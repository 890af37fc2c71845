use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::upload::form::ExperienceLevel;

#[derive(Parser, Debug)]
#[command(name = "resume-optimizer")]
#[command(version)]
#[command(about = "AI resume analysis and ATS optimization from the terminal", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session token
    Login(Credentials),

    /// Create an account and store the session token
    Signup(Credentials),

    /// Forget the stored session token
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Submit a resume for analysis
    Analyze(AnalyzeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct Credentials {
    #[arg(short, long)]
    pub email: String,

    /// Falls back to RESUME_PASSWORD when omitted
    #[arg(short, long, env = "RESUME_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    /// Resume file (PDF, DOC, or DOCX, max 10MB)
    pub resume: PathBuf,

    /// Target role, e.g. "Software Developer"
    #[arg(short, long)]
    pub role: String,

    /// Job description text to tailor against
    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub experience_level: Option<ExperienceLevel>,

    /// Directory for the printable optimized resume
    #[arg(long, default_value = ".")]
    pub export_dir: PathBuf,

    /// Also save the optimized resume markdown to this path
    #[arg(long)]
    pub markdown: Option<PathBuf>,

    /// Skip writing the printable optimized resume
    #[arg(long)]
    pub no_export: bool,
}
