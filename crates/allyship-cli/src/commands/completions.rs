use clap::{Args, CommandFactory};
use clap_complete::Shell;

use super::CmdResult;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    shell: Shell,
}

pub fn run(args: CompletionsArgs) -> CmdResult {
    let mut cmd = crate::Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "allyship", &mut std::io::stdout());
    Ok(())
}
