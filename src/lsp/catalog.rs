//! Command and option catalogs for BAMC scripts.
//!
//! Static, declaration-ordered registries. Each is indexed once on first use
//! and never written afterwards. Lookup is exact and case-sensitive.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::error::{CatalogError, CatalogResult};

/// Keyword that opens the JavaScript passage.
pub const BLOCK_OPENER: &str = "start-javascript";

/// Keyword that closes the JavaScript passage. Not a command on its own.
pub const BLOCK_CLOSER: &str = "end-javascript";

/// Commands whose first argument comes from an option catalog.
pub const BROWSER_COMMAND: &str = "browser";
pub const FEATURE_COMMAND: &str = "feature";

/// How an entry is presented and inserted by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// Bare word, inserted as plain text.
    Keyword,
    /// Command with arguments; the template may carry placeholders.
    Call,
    /// Multi-line structure or argument template with placeholders.
    Snippet,
    /// Fixed argument value, inserted as plain text.
    Value,
}

impl InsertKind {
    /// Whether the template is sent as a snippet rather than plain text.
    pub fn is_snippet(self) -> bool {
        matches!(self, Self::Call | Self::Snippet)
    }
}

/// A top-level BAMC command.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandEntry {
    pub keyword: &'static str,
    pub syntax: &'static str,
    pub description: &'static str,
    pub kind: InsertKind,
    pub template: &'static str,
}

/// A fixed argument value for `browser` or `feature`.
#[derive(Debug, PartialEq, Eq)]
pub struct OptionEntry {
    /// Unquoted value, e.g. `chrome`.
    pub value: &'static str,
    /// Short label shown beside the candidate.
    pub detail: &'static str,
    pub description: Option<&'static str>,
    pub kind: InsertKind,
    pub template: &'static str,
}

impl OptionEntry {
    /// The value as it appears in the completion list: `"chrome"`.
    pub fn label(&self) -> String {
        format!("\"{}\"", self.value)
    }
}

/// Anything a `Catalog` can index.
pub trait CatalogEntry: 'static {
    fn key(&self) -> &'static str;
    fn template(&self) -> &'static str;
}

impl CatalogEntry for CommandEntry {
    fn key(&self) -> &'static str {
        self.keyword
    }

    fn template(&self) -> &'static str {
        self.template
    }
}

impl CatalogEntry for OptionEntry {
    fn key(&self) -> &'static str {
        self.value
    }

    fn template(&self) -> &'static str {
        self.template
    }
}

/// Immutable keyword → entry map that remembers declaration order.
#[derive(Debug)]
pub struct Catalog<E: CatalogEntry> {
    name: &'static str,
    entries: &'static [E],
    index: HashMap<&'static str, usize>,
}

impl<E: CatalogEntry> Catalog<E> {
    /// Index `entries`, rejecting duplicate keys and templates that do not
    /// start with their key once placeholders are stripped.
    pub fn new(name: &'static str, entries: &'static [E]) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let key = entry.key();
            if key.is_empty() {
                return Err(CatalogError::EmptyKeyword(name));
            }
            if !strip_placeholders(entry.template()).starts_with(key) {
                return Err(CatalogError::TemplateMismatch {
                    keyword: key,
                    template: entry.template(),
                });
            }
            if index.insert(key, i).is_some() {
                return Err(CatalogError::DuplicateKeyword {
                    catalog: name,
                    keyword: key,
                });
            }
        }
        Ok(Self {
            name,
            entries,
            index,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn lookup(&self, key: &str) -> Option<&'static E> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &'static [E] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Replace `${N:text}` with `text` and drop bare `$N` tabstops.
pub fn strip_placeholders(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(dollar) = rest.find('$') {
        out.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];
        if let Some(body) = after.strip_prefix('{') {
            let digits = body.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 && body[digits..].starts_with(':') {
                if let Some(close) = body[digits + 1..].find('}') {
                    out.push_str(&body[digits + 1..digits + 1 + close]);
                    rest = &body[digits + 1 + close + 1..];
                    continue;
                }
            }
        } else {
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 {
                rest = &after[digits..];
                continue;
            }
        }
        out.push('$');
        rest = after;
    }
    out.push_str(rest);
    out
}

pub static COMMAND_ENTRIES: &[CommandEntry] = &[
    CommandEntry {
        keyword: "browser",
        syntax: "browser \"type\"",
        description: "Specifies the browser type (chrome/firefox). This must be the first line, or it will default to firefox.",
        kind: InsertKind::Keyword,
        template: "browser",
    },
    CommandEntry {
        keyword: "feature",
        syntax: "feature \"name\" ...",
        description: "Enables specific BAMC features like proxies or SSL settings.",
        kind: InsertKind::Keyword,
        template: "feature ",
    },
    CommandEntry {
        keyword: "visit",
        syntax: "visit \"url\"",
        description: "Instructs BAMM to make a request to the specified url.",
        kind: InsertKind::Call,
        template: "visit \"${1:url}\"",
    },
    CommandEntry {
        keyword: "wait-for-seconds",
        syntax: "wait-for-seconds number",
        description: "Instructs Selenium to pause execution for the specified number of second(s). Supports decimals/floats for second values (ie. 0.5, .5).",
        kind: InsertKind::Call,
        template: "wait-for-seconds ${1:1}",
    },
    CommandEntry {
        keyword: "add-header",
        syntax: "add-header \"header-name\" \"header-value\"",
        description: "Adds a header to the current Selenium session.",
        kind: InsertKind::Call,
        template: "add-header \"${1:header-name}\" \"${2:header-value}\"",
    },
    CommandEntry {
        keyword: "add-headers",
        syntax: "add-headers {\"header-name1\": \"header-value1\", ... }",
        description: "Adds a list of headers to the current Selenium session. Input is in the form of a JSON object.",
        kind: InsertKind::Call,
        template: "add-headers { \"${1:header-name1}\": \"${2:header-value1}\" }",
    },
    CommandEntry {
        keyword: "click",
        syntax: "click \"selector\"",
        description: "Invokes a standard click event on the selector specified.",
        kind: InsertKind::Call,
        template: "click \"${1:selector}\"",
    },
    CommandEntry {
        keyword: "click-at-position",
        syntax: "click-at-position \"x-coordinate\" \"y-coordinate\"",
        description: "For very specific cases where you have a known X and Y coordinate and need to click at exactly that location, use this.",
        kind: InsertKind::Call,
        template: "click-at-position \"${1:x-coordinate}\" \"${2:y-coordinate}\"",
    },
    CommandEntry {
        keyword: "click-exp",
        syntax: "click-exp 'selector'",
        description: "Experimental alternative to click, this utilizes javascript. Use this if click does not fit your needs.",
        kind: InsertKind::Call,
        template: "click-exp '${1:selector}'",
    },
    CommandEntry {
        keyword: "close-current-tab",
        syntax: "close-current-tab",
        description: "Instructs selenium to close the current tab. This will terminate the current Selenium instance if there is only one open tab.",
        kind: InsertKind::Call,
        template: "close-current-tab",
    },
    CommandEntry {
        keyword: "fill-text",
        syntax: "fill-text \"selector\" \"value\"",
        description: "Fills the 'value' attribute of the specified selector.",
        kind: InsertKind::Call,
        template: "fill-text \"${1:selector}\" \"${2:value}\"",
    },
    CommandEntry {
        keyword: "fill-text-exp",
        syntax: "fill-text-exp \"selector\" \"value\"",
        description: "An experimental version of fill-text that utilizes JavaScript. Try this if fill-text doesn't work for your needs.",
        kind: InsertKind::Call,
        template: "fill-text-exp \"${1:selector}\" \"${2:value}\"",
    },
    CommandEntry {
        keyword: "open-new-tab",
        syntax: "open-new-tab",
        description: "Instructs the current Selenium instance to open a new tab.",
        kind: InsertKind::Call,
        template: "open-new-tab",
    },
    CommandEntry {
        keyword: "save-as-html",
        syntax: "save-as-html \"file.html\"",
        description: "Saves the current page's source to the HTML file specified.",
        kind: InsertKind::Call,
        template: "save-as-html \"${1:file.html}\"",
    },
    // Only block command: everything up to `end-javascript` is opaque.
    CommandEntry {
        keyword: BLOCK_OPENER,
        syntax: "start-javascript ... end-javascript",
        description: "Inserts a JavaScript code block structure.",
        kind: InsertKind::Snippet,
        template: "start-javascript\n\n// Insert your js code here\n\nend-javascript",
    },
    CommandEntry {
        keyword: "take-screenshot",
        syntax: "take-screenshot \"file.png\"",
        description: "Saves a screenshot of the current page to the PNG file specified.",
        kind: InsertKind::Call,
        template: "take-screenshot \"${1:file.png}\"",
    },
];

pub static BROWSER_OPTIONS: &[OptionEntry] = &[
    OptionEntry {
        value: "chrome",
        detail: "Google Chrome",
        description: None,
        kind: InsertKind::Value,
        template: "chrome",
    },
    OptionEntry {
        value: "firefox",
        detail: "Mozilla Firefox (default)",
        description: None,
        kind: InsertKind::Value,
        template: "firefox",
    },
];

// Proxy templates close the feature-name quote and open the argument quote;
// the surrounding quotes come from the user's typing.
pub static FEATURE_OPTIONS: &[OptionEntry] = &[
    OptionEntry {
        value: "disable-ssl",
        detail: "Disable SSL Validation",
        description: None,
        kind: InsertKind::Value,
        template: "disable-ssl",
    },
    OptionEntry {
        value: "disable-pycache",
        detail: "Disable __pycache__",
        description: None,
        kind: InsertKind::Value,
        template: "disable-pycache",
    },
    OptionEntry {
        value: "use-http-proxy",
        detail: "HTTP Proxy with Args",
        description: Some("Format: \"USER:PASS@IP:PORT\" or \"NULL:NULL@IP:PORT\""),
        kind: InsertKind::Snippet,
        template: "use-http-proxy\" \"${1:USER:PASS@IP:PORT}",
    },
    OptionEntry {
        value: "use-https-proxy",
        detail: "HTTPS Proxy with Args",
        description: Some("Format: \"USER:PASS@IP:PORT\" or \"NULL:NULL@IP:PORT\""),
        kind: InsertKind::Snippet,
        template: "use-https-proxy\" \"${1:USER:PASS@IP:PORT}",
    },
    OptionEntry {
        value: "use-socks4-proxy",
        detail: "SOCKS4 Proxy",
        description: None,
        kind: InsertKind::Snippet,
        template: "use-socks4-proxy\" \"${1:USER:PASS@IP:PORT}",
    },
    OptionEntry {
        value: "use-socks5-proxy",
        detail: "SOCKS5 Proxy",
        description: None,
        kind: InsertKind::Snippet,
        template: "use-socks5-proxy\" \"${1:USER:PASS@IP:PORT}",
    },
];

static COMMANDS: LazyLock<Catalog<CommandEntry>> =
    LazyLock::new(|| built_in("command", COMMAND_ENTRIES));
static BROWSERS: LazyLock<Catalog<OptionEntry>> =
    LazyLock::new(|| built_in("browser", BROWSER_OPTIONS));
static FEATURES: LazyLock<Catalog<OptionEntry>> =
    LazyLock::new(|| built_in("feature", FEATURE_OPTIONS));

// Static data; `validate()` runs at startup so a bad table fails there first.
fn built_in<E: CatalogEntry>(name: &'static str, entries: &'static [E]) -> Catalog<E> {
    Catalog::new(name, entries)
        .unwrap_or_else(|e| panic!("built-in {name} catalog is invalid: {e}"))
}

pub fn commands() -> &'static Catalog<CommandEntry> {
    &COMMANDS
}

pub fn browsers() -> &'static Catalog<OptionEntry> {
    &BROWSERS
}

pub fn features() -> &'static Catalog<OptionEntry> {
    &FEATURES
}

/// The option catalog that supplies arguments for `command`, if any.
pub fn options_for(command: &str) -> Option<&'static Catalog<OptionEntry>> {
    match command {
        BROWSER_COMMAND => Some(browsers()),
        FEATURE_COMMAND => Some(features()),
        _ => None,
    }
}

/// Check every built-in table without panicking.
pub fn validate() -> CatalogResult<()> {
    Catalog::new("command", COMMAND_ENTRIES)?;
    Catalog::new("browser", BROWSER_OPTIONS)?;
    Catalog::new("feature", FEATURE_OPTIONS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_tables_validate() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn lookup_finds_every_command() {
        for entry in COMMAND_ENTRIES {
            let found = commands().lookup(entry.keyword).unwrap();
            assert_eq!(found.keyword, entry.keyword);
        }
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert!(commands().lookup("Visit").is_none());
        assert!(commands().lookup("visi").is_none());
        assert!(commands().lookup("visit ").is_none());
        assert!(commands().lookup("").is_none());
        assert!(commands().lookup(BLOCK_CLOSER).is_none());
    }

    #[test]
    fn entries_keep_declaration_order() {
        let keys: Vec<&str> = commands().entries().iter().map(|e| e.keyword).collect();
        assert_eq!(keys.first(), Some(&"browser"));
        assert_eq!(keys.get(1), Some(&"feature"));
        assert_eq!(keys.last(), Some(&"take-screenshot"));
        assert_eq!(keys.len(), 16);
    }

    #[test]
    fn option_catalogs_are_separate() {
        assert!(browsers().contains("chrome"));
        assert!(!commands().contains("chrome"));
        assert!(!features().contains("chrome"));
        assert!(features().contains("use-socks5-proxy"));
        assert_eq!(browsers().len(), 2);
        assert_eq!(features().len(), 6);
    }

    #[test]
    fn options_for_routes_by_command() {
        assert_eq!(options_for("browser").map(Catalog::name), Some("browser"));
        assert_eq!(options_for("feature").map(Catalog::name), Some("feature"));
        assert!(options_for("visit").is_none());
    }

    #[test]
    fn option_label_is_quoted() {
        assert_eq!(BROWSER_OPTIONS[0].label(), "\"chrome\"");
    }

    #[test]
    fn strip_placeholders_variants() {
        assert_eq!(strip_placeholders("visit \"${1:url}\""), "visit \"url\"");
        assert_eq!(strip_placeholders("a $1 b $0"), "a  b ");
        assert_eq!(
            strip_placeholders("use-http-proxy\" \"${1:USER:PASS@IP:PORT}"),
            "use-http-proxy\" \"USER:PASS@IP:PORT"
        );
        assert_eq!(strip_placeholders("cost $ 5"), "cost $ 5");
        assert_eq!(strip_placeholders("${unclosed"), "${unclosed");
    }

    static DUPLICATED: &[OptionEntry] = &[
        OptionEntry {
            value: "x",
            detail: "",
            description: None,
            kind: InsertKind::Value,
            template: "x",
        },
        OptionEntry {
            value: "x",
            detail: "",
            description: None,
            kind: InsertKind::Value,
            template: "x",
        },
    ];

    static MISMATCHED: &[CommandEntry] = &[CommandEntry {
        keyword: "visit",
        syntax: "",
        description: "",
        kind: InsertKind::Call,
        template: "${1:go} visit",
    }];

    #[test]
    fn duplicate_keys_rejected() {
        let err = Catalog::new("test", DUPLICATED).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateKeyword {
                catalog: "test",
                keyword: "x"
            }
        );
    }

    #[test]
    fn template_must_start_with_keyword() {
        let err = Catalog::new("test", MISMATCHED).unwrap_err();
        assert!(matches!(err, CatalogError::TemplateMismatch { keyword: "visit", .. }));
        assert!(err.to_string().contains("visit"));
    }
}
