use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

/// Generate shell completions on stdout, with an install hint on stderr so
/// redirecting stdout stays clean.
pub fn generate_completions(shell: Shell) -> Result<()> {
    write_completions(shell, &mut io::stdout());

    let hint = install_hint(shell);
    if !hint.is_empty() {
        eprintln!();
        for line in hint {
            eprintln!("# {}", line);
        }
    }
    Ok(())
}

pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

fn install_hint(shell: Shell) -> &'static [&'static str] {
    match shell {
        Shell::Bash => &[
            "Add completions to bash:",
            "cronplan completion bash > ~/.local/share/bash-completion/completions/cronplan",
        ],
        Shell::Zsh => &[
            "Add completions to zsh:",
            "cronplan completion zsh > ~/.zfunc/_cronplan",
            "Then add to ~/.zshrc: fpath=(~/.zfunc $fpath); autoload -Uz compinit && compinit",
        ],
        Shell::Fish => &[
            "Add completions to fish:",
            "cronplan completion fish > ~/.config/fish/completions/cronplan.fish",
        ],
        _ => &[],
    }
}
