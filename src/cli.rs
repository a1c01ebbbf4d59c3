use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dothings",
    version,
    about = "Personal task manager driven by free-text commands",
    after_help = "Without a command, starts an interactive prompt. Type \"help\" there for the command list."
)]
pub struct Cli {
    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Directory holding tasks.txt and state.json
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print shell completions and exit
    #[arg(long = "completions", value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Command to run once, e.g. `add buy milk tomorrow 5pm @milk`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// The trailing words joined back into one command line, if any were given.
    pub fn command_line(&self) -> Option<String> {
        if self.command.is_empty() {
            None
        } else {
            Some(self.command.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_words_form_the_command() {
        let cli = Cli::parse_from(["dothings", "--no-color", "add", "meeting", "10:00", "-", "11:00"]);
        assert!(cli.no_color);
        assert_eq!(cli.command_line().as_deref(), Some("add meeting 10:00 - 11:00"));
    }

    #[test]
    fn no_command_means_interactive() {
        let cli = Cli::parse_from(["dothings", "-v", "--data-dir", "/tmp/tasks"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/tasks")));
        assert_eq!(cli.command_line(), None);
    }
}
