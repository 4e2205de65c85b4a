pub const DEFAULT_DEV_MODE: bool = false;
pub const DEFAULT_NAMESPACE: &str = "App";

pub const DEFAULT_HASHED_FILENAME_LENGTH: i64 = 8;
pub const MIN_HASHED_FILENAME_LENGTH: i64 = 4;
pub const MAX_HASHED_FILENAME_LENGTH: i64 = 32;

pub const DEFAULT_MAX_WORKERS: i64 = 8;
pub const CI_MAX_WORKERS: i64 = 4;
pub const MAX_WORKERS_LIMIT: i64 = 16;

pub const DEFAULT_TRANSPILE_FILE: &str = "module.tsx";
pub const STENCIL_INTERNAL_CLIENT_ID: &str = "@stencil/core/internal/client";

pub const DEFAULT_SRC_DIR: &str = "src";
pub const DEFAULT_CACHE_DIR: &str = ".stencil";
pub const DEFAULT_INDEX_HTML: &str = "index.html";
pub const DEFAULT_PACKAGE_JSON: &str = "package.json";
pub const DEFAULT_TSCONFIG: &str = "tsconfig.json";

pub const WWW: &str = "www";
pub const DIST: &str = "dist";

/// Output target types the build knows how to emit.
pub const VALID_OUTPUT_TARGET_TYPES: &[&str] = &[
    "angular",
    "copy",
    "custom",
    DIST,
    "dist-collection",
    "dist-custom-elements",
    "dist-hydrate-script",
    "dist-lazy",
    "docs-custom",
    "docs-custom-elements-manifest",
    "docs-json",
    "docs-readme",
    "docs-vscode",
    "stats",
    WWW,
];
