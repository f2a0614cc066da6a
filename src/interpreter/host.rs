use std::io::{self, BufRead, Write};

/// The synchronous display/prompt collaborator the interpreter talks to.
///
/// `hiển_thị` goes through [`Host::show`] (fire-and-forget) and `nhập`
/// through [`Host::ask`] (blocking). Tests typically substitute a recording
/// implementation.
pub trait Host {
    /// Displays a message to the user.
    fn show(&mut self, message: &str);
    /// Prompts the user for one line of input. `None` means no input was
    /// available.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

/// A [`Host`] backed by stdout/stdin, used by the CLI.
#[derive(Debug, Default)]
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn show(&mut self, message: &str) {
        println!("{message}");
    }

    fn ask(&mut self, prompt: &str) -> Option<String> {
        if !prompt.is_empty() {
            print!("{prompt} ");
            let _ = io::stdout().flush();
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }
}
