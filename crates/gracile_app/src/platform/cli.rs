use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use gracile_core::{FieldName, FormKind};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
pub enum FormChoice {
    /// Subscriptions page form, posts to /process_add_subscription.
    AddSubscription,
    /// Test page form, posts to /process.
    Process,
}

impl From<FormChoice> for FormKind {
    fn from(choice: FormChoice) -> Self {
        match choice {
            FormChoice::AddSubscription => FormKind::AddSubscription,
            FormChoice::Process => FormKind::Process,
        }
    }
}

/// Submit RSS subscription forms and show the server's reply.
#[derive(Debug, Default, Parser)]
#[command(name = "gracile", version)]
pub struct Cli {
    /// RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Which form to bind.
    #[arg(long, value_enum)]
    pub form: Option<FormChoice>,
    /// Server base url the endpoint paths are joined to.
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long)]
    pub user_id: Option<String>,
    #[arg(long)]
    pub rss_url: Option<String>,
    #[arg(long)]
    pub daily_amount: Option<String>,
    /// Submit once, print the result and exit.
    #[arg(long)]
    pub submit: bool,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Input values given on the command line.
    pub fn prefilled(&self) -> Vec<(FieldName, &str)> {
        [
            (FieldName::UserId, &self.user_id),
            (FieldName::RssUrl, &self.rss_url),
            (FieldName::DailyAmount, &self.daily_amount),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
        .collect()
    }
}
