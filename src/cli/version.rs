//! Version and help output.

/// The current version of afdview, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text for `--help`.
pub const USAGE: &str = "\
afdview - view NWS Area Forecast Discussions in the terminal

USAGE:
    afdview [OFFICE] [OPTIONS]

ARGS:
    OFFICE               Forecast office, e.g. KPQR or PQR

OPTIONS:
        --office ID      Forecast office (same as OFFICE)
        --file PATH      Read a saved product (.json) or raw bulletin text
        --issued TIME    Issuance time for raw text files (RFC 3339)
    -p, --print          Print the discussion to stdout and exit
    -w, --width N        Wrap width for --print (default: terminal width)
        --no-links       Do not emit terminal hyperlinks
    -V, --version        Show version information
    -h, --help           Show this help

KEYS:
    q, Esc               Quit
    j/k, Up/Down         Scroll one line
    PgUp/PgDn, Space     Scroll one page
    g/G, Home/End        Jump to top/bottom
    Tab/Shift-Tab        Select next/previous link
    Enter                Open the selected link
    r                    Reload
";

/// Version line, e.g. `afdview 0.1.0`.
pub fn version_string() -> String {
    format!("afdview {}", VERSION)
}
