/*!
 * Clipboard support for projdump
 *
 * Pipes the dump into whichever platform clipboard helper is available.
 * A missing helper (headless machines, CI) is reported as an error value,
 * never a panic; callers decide how much it matters.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Trait for clipboard operations
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// The host clipboard, resolved on each copy
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

/// Available clipboard providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClipboardProvider {
    /// tmux clipboard
    Tmux,
    /// X11 clipboard with xclip
    Xclip,
    /// X11 clipboard with xsel
    Xsel,
    /// Wayland clipboard
    Wayland,
    /// macOS clipboard
    MacOS,
    /// Windows clipboard through PowerShell, reading stdin as UTF-8
    PowerShell,
    /// Windows `clip.exe`, decodes stdin with the console code page so
    /// non-ASCII text (including the banner glyph) can arrive garbled
    Windows,
    /// Termux clipboard
    Termux,
}

const POWERSHELL_SET_CLIPBOARD: &str =
    "[Console]::InputEncoding = [Text.Encoding]::UTF8; Set-Clipboard -Value ([Console]::In.ReadToEnd())";

impl ClipboardProvider {
    fn command(&self) -> (&'static str, Vec<&'static str>) {
        match self {
            Self::Tmux => ("tmux", vec!["load-buffer", "-w", "-"]),
            Self::Xclip => ("xclip", vec!["-selection", "clipboard", "-in"]),
            Self::Xsel => ("xsel", vec!["-b", "-i"]),
            Self::Wayland => ("wl-copy", vec![]),
            Self::MacOS => ("pbcopy", vec![]),
            Self::PowerShell => (
                "powershell.exe",
                vec![
                    "-NoProfile",
                    "-NonInteractive",
                    "-Command",
                    POWERSHELL_SET_CLIPBOARD,
                ],
            ),
            Self::Windows => ("clip.exe", vec![]),
            Self::Termux => ("termux-clipboard-set", vec![]),
        }
    }
}

impl Clipboard for ClipboardProvider {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();
        execute_clipboard_command(cmd, &args, text)
    }
}

//--------------------------------------------------------------------
// Public API
//--------------------------------------------------------------------

/// Copy text to the clipboard
///
/// Tries every detected provider in order of preference and stops at the
/// first one that succeeds.
///
/// # Examples
/// ```no_run
/// use projdump::clipboard::copy_to_clipboard;
///
/// if let Err(e) = copy_to_clipboard("Hello, clipboard!") {
///     eprintln!("Failed to copy to clipboard: {}", e);
/// }
/// ```
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let providers = determine_clipboard_providers();
    let mut last_error = ClipboardError::NoClipboardFound;

    for provider in providers {
        match provider.copy_to_clipboard(text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::debug!("Clipboard provider {:?} failed: {}", provider, e);
                last_error = e;
            }
        }
    }

    Err(last_error)
}

/// Check if a command exists on the `PATH`
pub fn command_exists(command: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };

    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(command);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

//--------------------------------------------------------------------
// Internal Implementation
//--------------------------------------------------------------------

/// Spawn `cmd`, feed `text` on stdin and wait for it to exit
fn execute_clipboard_command(cmd: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", cmd, e)))?;

    {
        let mut stdin = child.stdin.take().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| ClipboardError::CommandFailed(format!("Failed to write to {}: {}", cmd, e)))?;
        // stdin dropped here so the helper sees EOF
    }

    let status = child.wait()?;

    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status: {}",
            cmd, status
        )))
    }
}

/// Platform detection cache
static PLATFORM: OnceLock<&'static str> = OnceLock::new();

/// Determine the platform (cached)
fn get_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "android") {
            "android"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else {
            "unknown"
        }
    })
}

/// Determine which clipboard providers to try based on platform and environment
fn determine_clipboard_providers() -> Vec<ClipboardProvider> {
    let mut providers = Vec::with_capacity(3);

    // Inside a tmux session the tmux buffer (forwarded with -w) comes first
    if env::var("TMUX").is_ok() && command_exists("tmux") {
        providers.push(ClipboardProvider::Tmux);
    }

    match get_platform() {
        "macos" => {
            if command_exists("pbcopy") {
                providers.push(ClipboardProvider::MacOS);
            }
        }
        "windows" | "wsl" => {
            if command_exists("powershell.exe") || command_exists("powershell") {
                providers.push(ClipboardProvider::PowerShell);
            }

            if command_exists("clip.exe") || command_exists("clip") {
                providers.push(ClipboardProvider::Windows);
            }
        }
        "linux" => {
            if env::var("WAYLAND_DISPLAY").is_ok() && command_exists("wl-copy") {
                providers.push(ClipboardProvider::Wayland);
            }

            if env::var("DISPLAY").is_ok() {
                if command_exists("xsel") {
                    providers.push(ClipboardProvider::Xsel);
                }

                if command_exists("xclip") {
                    providers.push(ClipboardProvider::Xclip);
                }
            }
        }
        "android" => {
            if command_exists("termux-clipboard-set") {
                providers.push(ClipboardProvider::Termux);
            }
        }
        _ => {}
    }

    providers
}
