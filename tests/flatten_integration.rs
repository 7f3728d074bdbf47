/*!
 * Integration tests for the public flatten API
 */

use std::fs::{self, File};
use std::io::Write;
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;
use projdump::{
    clipboard, flatten, Clipboard, ClipboardStatus, Config, ProjectFlattener, SkipReason,
};
use tempfile::tempdir;

/// Thread-safe clipboard double
#[derive(Clone, Default)]
struct SharedClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl Clipboard for SharedClipboard {
    fn copy_to_clipboard(&self, text: &str) -> clipboard::Result<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[test]
fn test_flatten_dotnet_project() {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    let root = project.path();

    fs::create_dir_all(root.join("Api/Controllers")).unwrap();
    fs::create_dir_all(root.join("Api/obj/Debug")).unwrap();
    fs::create_dir_all(root.join("Api.Tests")).unwrap();

    fs::write(root.join("Api/Api.csproj"), "<Project Sdk=\"Microsoft.NET.Sdk.Web\" />").unwrap();
    fs::write(
        root.join("Api/Controllers/UsersController.cs"),
        "public class UsersController {}",
    )
    .unwrap();
    fs::write(root.join("Api/appsettings.json"), "{ \"ConnectionStrings\": {} }").unwrap();
    fs::write(root.join("Api/obj/Debug/Api.AssemblyInfo.cs"), "// generated").unwrap();
    fs::write(root.join("Api.Tests/UsersControllerTest.cs"), "public class T {}").unwrap();
    fs::write(root.join("Api/Program.cs"), "\n\n").unwrap();

    let output_file = out_dir.path().join("project_dump.txt");
    let clipboard = SharedClipboard::default();
    let config = Config {
        root_path: root.to_path_buf(),
        output_file: output_file.clone(),
        sort_entries: true,
        ..Config::default()
    };

    let stats = ProjectFlattener::new(config, Arc::new(ProgressBar::hidden()))
        .with_clipboard(Box::new(clipboard.clone()))
        .run()
        .unwrap();

    let dump = fs::read_to_string(&output_file).unwrap();
    assert!(dump.contains("Api.csproj"));
    assert!(dump.contains("public class UsersController {}"));
    assert!(!dump.contains("ConnectionStrings"));
    assert!(!dump.contains("AssemblyInfo"));
    assert!(!dump.contains("UsersControllerTest"));
    assert!(!dump.contains("Program.cs"));

    assert_eq!(stats.files_included, 2);
    assert!(stats.is_success());
    assert_eq!(clipboard.copied.lock().unwrap().as_slice(), &[dump]);

    let reasons: Vec<_> = stats.reported_skips().map(|s| s.reason.clone()).collect();
    assert!(reasons.contains(&SkipReason::ExcludedName));
    assert!(reasons.contains(&SkipReason::ExcludedPattern("*test*.cs".to_string())));
}

#[test]
fn test_override_extensions() {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();

    let mut file = File::create(project.path().join("main.rs")).unwrap();
    writeln!(file, "fn main() {{}}").unwrap();
    fs::write(project.path().join("README.md"), "# readme").unwrap();

    let config = Config {
        root_path: project.path().to_path_buf(),
        output_file: out_dir.path().join("dump.txt"),
        copy_to_clipboard: false,
        ..Config::default()
    }
    .with_included_extensions([".rs"]);

    let stats = flatten(config).unwrap();

    assert_eq!(stats.files_included, 1);
    assert_eq!(stats.file_details[0].0, "main.rs");
    assert!(matches!(stats.clipboard, ClipboardStatus::Disabled));
}

#[test]
#[ignore] // Requires a reachable system clipboard (X11, Wayland, tmux, macOS or Windows)
          // To run this test manually use: cargo test --test flatten_integration -- --ignored
fn test_system_clipboard() {
    let project = tempdir().unwrap();
    let out_dir = tempdir().unwrap();
    fs::write(project.path().join("notes.md"), "Test content for clipboard integration").unwrap();

    let config = Config {
        root_path: project.path().to_path_buf(),
        output_file: out_dir.path().join("project_dump.txt"),
        ..Config::default()
    };

    let stats = flatten(config).unwrap();
    assert!(stats.clipboard_ready(), "clipboard status: {}", stats.clipboard);
}
