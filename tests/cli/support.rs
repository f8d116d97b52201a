use std::fs;
use std::path::Path;

use assert_cmd::{cargo::cargo_bin_cmd, Command};

/// Get a Command for scorecard, isolated from the user's global config and
/// log filters
pub fn scorecard() -> Command {
    let mut cmd = cargo_bin_cmd!("scorecard");
    cmd.env("SCORECARD_CONFIG_DIR", "/nonexistent/scorecard-config")
        .env_remove("RUST_LOG")
        .env_remove("SCORECARD_LOG");
    cmd
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project that scores 16.3/33 with the built-in rubric
pub fn fixture_project(root: &Path) {
    for dir in ["src/components", "src/pages", "src/services", "src/types"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    write(
        root,
        "src/services/api.ts",
        "export const http = axios.create({ baseURL: '/api/platforms' });\nhttp.get('/health');",
    );
    write(
        root,
        "src/services/platform.ts",
        "await fetch('/api/accounts');\nawait fetch('/api/resources/search');\nawait fetch('/refresh');",
    );
    write(
        root,
        "src/types/index.ts",
        "export interface PlatformAccount { id: string }\nexport interface ResourceLibrary { id: string }\nexport interface ResourceInfo { id: string }\nexport interface ApiResponse<T> { data: T }\nexport type Raw = any;",
    );
    write(root, "src/components/Button.tsx", "export const Button = () => null;");
    write(
        root,
        "package.json",
        r#"{"dependencies": {"react": "^18.2.0"}, "devDependencies": {"typescript": "^5.0.0"}, "scripts": {"dev": "vite", "build": "vite build"}}"#,
    );
}

/// A project with nothing but an empty package.json (scores 1/33)
pub fn bare_project(root: &Path) {
    write(root, "package.json", "{}");
}

/// A small rubric with a single structure category
pub const TINY_RUBRIC: &str = r#"
name = "tiny"

[[categories]]
name = "docs"
title = "Documentation"
max_points = 2.0

[[categories.checks]]
type = "path_exists"
path = "README.md"
weight = 1.0

[[categories.checks]]
type = "content_contains"
files = "README.md"
substring = "Usage"
weight = 1.0
"#;

/// A rubric whose bands leave a gap between 2 and 3
pub const GAPPED_RUBRIC: &str = r#"
[[categories]]
name = "types"
max_points = 1.0

[[categories.checks]]
type = "count_threshold"
metric = "files"
bands = [
    { from = 0.0, to = 2.0, weight = 0.0 },
    { from = 3.0, weight = 1.0 },
]

[categories.checks.count]
source = "file_count"
files = "src"
"#;
