//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "scholar", version, about = "Scholar academic portal client")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(short, long, global = true, help = "Log requests and token refreshes")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Config file (default: <config dir>/scholar/config.toml)")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Portal address, overrides the config file")]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long, short)]
        username: String,
        #[arg(long, env = "SCHOLAR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out and forget the session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Subject catalogue
    Subjects {
        #[command(subcommand)]
        command: SubjectCommands,
    },
    /// Syllabi and assessments
    Syllabi {
        #[command(subcommand)]
        command: SyllabusCommands,
    },
    /// Program curricula
    Curricula {
        #[command(subcommand)]
        command: CurriculumCommands,
    },
    /// A student's prerequisite roadmap
    Roadmap {
        #[command(subcommand)]
        command: RoadmapCommands,
    },
    /// AI tutor chat
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommands {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        page_size: u32,
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        credits: u32,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum SyllabusCommands {
    List {
        subject_id: i64,
    },
    AddAssessment {
        syllabus_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "exam")]
        kind: String,
        #[arg(long)]
        weight: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum CurriculumCommands {
    List,
    Publish { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum RoadmapCommands {
    Show {
        student_id: i64,
        #[arg(long, help = "List subjects in an order that respects prerequisites")]
        order: bool,
    },
    Link {
        student_id: i64,
        #[arg(help = "Prerequisite node")]
        source: i64,
        #[arg(help = "Dependent node")]
        target: i64,
    },
    Unlink {
        link_id: i64,
    },
    Complete {
        node_id: i64,
        #[arg(long, help = "Mark as not completed")]
        undo: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChatCommands {
    List,
    Send {
        message: String,
        #[arg(long, help = "Conversation to continue; a new one is started otherwise")]
        conversation: Option<Uuid>,
        #[arg(long, default_value = "New conversation")]
        title: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["scholar", "subjects", "list", "--page", "3", "--json"]).unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Subjects {
                command: SubjectCommands::List { page, page_size, search },
            } => {
                assert_eq!(page, 3);
                assert_eq!(page_size, 20);
                assert_eq!(search, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_roadmap_link_arguments() {
        let cli = Cli::try_parse_from(["scholar", "roadmap", "link", "7", "1", "3"]).unwrap();

        match cli.command {
            Commands::Roadmap {
                command: RoadmapCommands::Link { student_id, source, target },
            } => assert_eq!((student_id, source, target), (7, 1, 3)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_chat_send_rejects_bad_conversation_id() {
        let result = Cli::try_parse_from(["scholar", "chat", "send", "hi", "--conversation", "nope"]);
        assert!(result.is_err());
    }
}
