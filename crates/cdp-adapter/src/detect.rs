use std::env;
use std::path::PathBuf;

use which::which;

/// Finds a Chromium binary: `AUTOWEB_CHROME`, then `PATH`, then well-known
/// install locations (skipped when `AUTOWEB_SKIP_OS_PATHS` is set).
pub fn detect_chrome_executable() -> Option<PathBuf> {
    if let Ok(raw) = env::var("AUTOWEB_CHROME") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            let candidate = PathBuf::from(trimmed);
            if candidate.exists() {
                return Some(candidate);
            }
        }
    }

    for name in chrome_executable_names() {
        if let Ok(path) = which(name) {
            return Some(path);
        }
    }

    let skip_defaults = env::var("AUTOWEB_SKIP_OS_PATHS")
        .map(|value| !value.trim().is_empty())
        .unwrap_or(false);
    if skip_defaults {
        return None;
    }
    os_specific_chrome_paths()
        .into_iter()
        .find(|candidate| candidate.exists())
}

fn chrome_executable_names() -> &'static [&'static str] {
    #[cfg(target_os = "windows")]
    {
        &["chrome.exe", "chromium.exe", "msedge.exe"]
    }

    #[cfg(not(target_os = "windows"))]
    {
        &[
            "google-chrome-stable",
            "google-chrome",
            "chromium",
            "chromium-browser",
        ]
    }
}

fn os_specific_chrome_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let mut paths = Vec::new();
        for key in ["PROGRAMFILES", "PROGRAMFILES(X86)", "LOCALAPPDATA"] {
            if let Ok(value) = env::var(key) {
                let root = PathBuf::from(value.trim());
                paths.push(root.join("Google/Chrome/Application/chrome.exe"));
                paths.push(root.join("Chromium/Application/chrome.exe"));
            }
        }
        paths
    }

    #[cfg(target_os = "macos")]
    {
        vec![
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
            PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
        ]
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        vec![
            PathBuf::from("/usr/bin/google-chrome-stable"),
            PathBuf::from("/usr/bin/google-chrome"),
            PathBuf::from("/usr/bin/chromium-browser"),
            PathBuf::from("/usr/bin/chromium"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // Both cases mutate process environment, so they run as one test.
    #[test]
    fn detects_from_env_var_then_path() {
        let dir = tempdir().unwrap();
        let exe_path = dir.path().join("my-chrome");
        fs::write(&exe_path, b"").unwrap();

        let original_chrome = env::var("AUTOWEB_CHROME").ok();
        let original_path = env::var("PATH").ok();
        let original_skip = env::var("AUTOWEB_SKIP_OS_PATHS").ok();

        env::set_var("AUTOWEB_CHROME", &exe_path);
        let from_env = detect_chrome_executable();

        let name = chrome_executable_names()[0];
        let on_path = dir.path().join(name);
        fs::write(&on_path, b"").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&on_path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        env::set_var("AUTOWEB_CHROME", "");
        env::set_var("AUTOWEB_SKIP_OS_PATHS", "1");
        env::set_var("PATH", dir.path());
        let from_path = detect_chrome_executable();

        restore("AUTOWEB_CHROME", original_chrome);
        restore("PATH", original_path);
        restore("AUTOWEB_SKIP_OS_PATHS", original_skip);

        assert_eq!(from_env, Some(exe_path));
        assert_eq!(from_path, Some(on_path));
    }

    fn restore(key: &str, value: Option<String>) {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}
