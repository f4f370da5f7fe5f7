use std::process::Command;
use tracing::{debug, info, warn};

/// Opens main menu links
pub trait Launcher {
    fn open(&self, url: &str);
}

/// Hands the URL to the platform's default browser; the outcome is only logged
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn open(&self, url: &str) {
        let mut child = match browser_command(url).spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to launch browser");
                return;
            }
        };

        info!(url = %url, "Opened link in browser");

        // The opener exits on its own; wait off the prompt loop so it is reaped
        let url = url.to_string();
        std::thread::spawn(move || match child.wait() {
            Ok(status) if status.success() => debug!(url = %url, "Browser opener exited"),
            Ok(status) => warn!(url = %url, status = %status, "Browser opener failed"),
            Err(e) => warn!(url = %url, error = %e, "Failed to wait for browser opener"),
        });
    }
}

// No shell is involved, so `&` and `^` in query strings reach the handler intact
#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.args(["url.dll,FileProtocolHandler", url]);
    command
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUERY_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&ab_channel=RickAstley";

    #[test]
    fn test_url_is_passed_as_single_argument() {
        let command = browser_command(QUERY_URL);
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some(QUERY_URL));
        assert!(args.iter().all(|a| a.to_str() != Some("ab_channel=RickAstley")));
    }

    #[test]
    fn test_opener_is_not_a_shell() {
        let command = browser_command(QUERY_URL);
        let program = command.get_program().to_string_lossy().to_lowercase();
        assert!(!["cmd", "cmd.exe", "sh", "bash"].contains(&program.as_str()));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_uses_url_protocol_handler() {
        let command = browser_command(QUERY_URL);
        let args: Vec<_> = command.get_args().filter_map(|a| a.to_str()).collect();
        assert_eq!(command.get_program(), "rundll32");
        assert_eq!(args, vec!["url.dll,FileProtocolHandler", QUERY_URL]);
    }
}
