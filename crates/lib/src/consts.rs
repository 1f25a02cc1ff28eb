/// Offset from the root project directory to the shared output base.
pub const DEFAULT_OUTPUT_OFFSET: &str = "../../build";

/// Overrides the configured output offset when set.
pub const OUTPUT_OFFSET_ENV: &str = "OUTBASE_OUTPUT_OFFSET";

pub const DEFAULT_ROOT_PROJECT: &str = "root";

/// Subproject every other subproject is evaluated after.
pub const DEFAULT_EVALUATION_ANCHOR: &str = "app";

/// Well-known task name the cleanup action is registered under.
pub const CLEAN_TASK: &str = "clean";

pub const DEFAULT_CLASSPATH: &str = "com.google.gms:google-services:4.4.2";

pub const GOOGLE_REPOSITORY_URL: &str = "https://dl.google.com/dl/android/maven2/";
pub const MAVEN_CENTRAL_REPOSITORY_URL: &str = "https://repo.maven.apache.org/maven2/";
