//! Time zone table trait

/// Static zone name to POSIX TZ rule lookup
pub trait TimeZoneTable {
    /// Look up the POSIX rule for an IANA zone name (exact, case-sensitive)
    fn lookup(&self, name: &str) -> Option<&'static str>;

    /// All known zone names in table order
    fn names(&self) -> impl Iterator<Item = &'static str> + '_;
}
