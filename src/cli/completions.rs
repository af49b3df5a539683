use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    osgirun completions bash > ~/.bash_completion.d/osgirun\n\n\
                  Generate zsh completions:\n    osgirun completions zsh > ~/.zfunc/_osgirun\n\n\
                  Generate fish completions:\n    osgirun completions fish > ~/.config/fish/completions/osgirun.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
