//! Built-in time zone table
//!
//! Maps IANA zone names to the POSIX TZ rules the system clock understands.
//!
//! [`BUILTIN_ZONES`] is a hand-picked subset of the IANA database (about a
//! hundred commonly used zones, not all ~425 canonical ones), so
//! `get allTimeZones` lists and `set timeZone` accepts only these. Boards
//! that need the full set pass their own table to [`ZoneTable::new`].

use crate::traits::TimeZoneTable;

/// Zone table over a static `(name, posix)` slice
#[derive(Debug, Clone, Copy)]
pub struct ZoneTable {
    entries: &'static [(&'static str, &'static str)],
}

impl ZoneTable {
    /// Create a table over the given entries
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// The built-in table
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_ZONES)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TimeZoneTable for ZoneTable {
    fn lookup(&self, name: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(zone, _)| *zone == name)
            .map(|(_, posix)| *posix)
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(zone, _)| *zone)
    }
}

/// Zones shipped with the firmware
pub const BUILTIN_ZONES: &[(&str, &str)] = &[
    ("Etc/UTC", "UTC0"),
    ("Etc/GMT", "GMT0"),
    ("Europe/London", "GMT0BST,M3.5.0/1,M10.5.0"),
    ("Europe/Dublin", "IST-1GMT0,M10.5.0,M3.5.0/1"),
    ("Europe/Lisbon", "WET0WEST,M3.5.0/1,M10.5.0"),
    ("Europe/Amsterdam", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Berlin", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Madrid", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Paris", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Rome", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Stockholm", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Warsaw", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Athens", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Helsinki", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Istanbul", "<+03>-3"),
    ("Europe/Moscow", "MSK-3"),
    ("Europe/Brussels", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Vienna", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Zurich", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Prague", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Budapest", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Copenhagen", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Oslo", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Belgrade", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Luxembourg", "CET-1CEST,M3.5.0,M10.5.0/3"),
    ("Europe/Bucharest", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Sofia", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Riga", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Tallinn", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Vilnius", "EET-2EEST,M3.5.0/3,M10.5.0/4"),
    ("Europe/Minsk", "<+03>-3"),
    ("Atlantic/Reykjavik", "GMT0"),
    ("Atlantic/Azores", "<-01>1<+00>,M3.5.0/0,M10.5.0/1"),
    ("Atlantic/Canary", "WET0WEST,M3.5.0/1,M10.5.0"),
    ("Africa/Cairo", "EET-2EEST,M4.5.5/0,M10.5.4/24"),
    ("Africa/Johannesburg", "SAST-2"),
    ("Africa/Lagos", "WAT-1"),
    ("Africa/Nairobi", "EAT-3"),
    ("Africa/Algiers", "CET-1"),
    ("Africa/Tunis", "CET-1"),
    ("Africa/Accra", "GMT0"),
    ("Africa/Kinshasa", "WAT-1"),
    ("Africa/Addis_Ababa", "EAT-3"),
    ("Africa/Khartoum", "CAT-2"),
    ("Africa/Maputo", "CAT-2"),
    ("America/St_Johns", "NST3:30NDT,M3.2.0,M11.1.0"),
    ("America/Halifax", "AST4ADT,M3.2.0,M11.1.0"),
    ("America/New_York", "EST5EDT,M3.2.0,M11.1.0"),
    ("America/Toronto", "EST5EDT,M3.2.0,M11.1.0"),
    ("America/Chicago", "CST6CDT,M3.2.0,M11.1.0"),
    ("America/Mexico_City", "CST6"),
    ("America/Denver", "MST7MDT,M3.2.0,M11.1.0"),
    ("America/Phoenix", "MST7"),
    ("America/Los_Angeles", "PST8PDT,M3.2.0,M11.1.0"),
    ("America/Vancouver", "PST8PDT,M3.2.0,M11.1.0"),
    ("America/Anchorage", "AKST9AKDT,M3.2.0,M11.1.0"),
    ("America/Bogota", "<-05>5"),
    ("America/Sao_Paulo", "<-03>3"),
    ("America/Argentina/Buenos_Aires", "<-03>3"),
    ("America/Detroit", "EST5EDT,M3.2.0,M11.1.0"),
    ("America/Havana", "CST5CDT,M3.2.0/0,M11.1.0/1"),
    ("America/Panama", "EST5"),
    ("America/Jamaica", "EST5"),
    ("America/Puerto_Rico", "AST4"),
    ("America/Winnipeg", "CST6CDT,M3.2.0,M11.1.0"),
    ("America/Regina", "CST6"),
    ("America/Guatemala", "CST6"),
    ("America/Costa_Rica", "CST6"),
    ("America/Edmonton", "MST7MDT,M3.2.0,M11.1.0"),
    ("America/Tijuana", "PST8PDT,M3.2.0,M11.1.0"),
    ("America/Lima", "<-05>5"),
    ("America/Caracas", "<-04>4"),
    ("America/La_Paz", "<-04>4"),
    ("America/Santiago", "<-04>4<-03>,M9.1.6/24,M4.1.6/24"),
    ("America/Montevideo", "<-03>3"),
    ("Asia/Dubai", "<+04>-4"),
    ("Asia/Karachi", "PKT-5"),
    ("Asia/Kolkata", "IST-5:30"),
    ("Asia/Kathmandu", "<+0545>-5:45"),
    ("Asia/Dhaka", "<+06>-6"),
    ("Asia/Bangkok", "<+07>-7"),
    ("Asia/Jakarta", "WIB-7"),
    ("Asia/Singapore", "<+08>-8"),
    ("Asia/Shanghai", "CST-8"),
    ("Asia/Hong_Kong", "HKT-8"),
    ("Asia/Taipei", "CST-8"),
    ("Asia/Seoul", "KST-9"),
    ("Asia/Tokyo", "JST-9"),
    ("Asia/Jerusalem", "IST-2IDT,M3.4.4/26,M10.5.0"),
    ("Asia/Riyadh", "<+03>-3"),
    ("Asia/Baghdad", "<+03>-3"),
    ("Asia/Tehran", "<+0330>-3:30"),
    ("Asia/Kabul", "<+0430>-4:30"),
    ("Asia/Tashkent", "<+05>-5"),
    ("Asia/Yekaterinburg", "<+05>-5"),
    ("Asia/Colombo", "<+0530>-5:30"),
    ("Asia/Yangon", "<+0630>-6:30"),
    ("Asia/Novosibirsk", "<+07>-7"),
    ("Asia/Ho_Chi_Minh", "<+07>-7"),
    ("Asia/Kuala_Lumpur", "<+08>-8"),
    ("Asia/Manila", "PST-8"),
    ("Asia/Makassar", "WITA-8"),
    ("Asia/Jayapura", "WIT-9"),
    ("Asia/Vladivostok", "<+10>-10"),
    ("Australia/Perth", "AWST-8"),
    ("Australia/Adelaide", "ACST-9:30ACDT,M10.1.0,M4.1.0/3"),
    ("Australia/Brisbane", "AEST-10"),
    ("Australia/Sydney", "AEST-10AEDT,M10.1.0,M4.1.0/3"),
    ("Australia/Darwin", "ACST-9:30"),
    ("Australia/Melbourne", "AEST-10AEDT,M10.1.0,M4.1.0/3"),
    ("Australia/Hobart", "AEST-10AEDT,M10.1.0,M4.1.0/3"),
    ("Pacific/Honolulu", "HST10"),
    ("Pacific/Auckland", "NZST-12NZDT,M9.5.0,M4.1.0/3"),
    ("Pacific/Pago_Pago", "SST11"),
    ("Pacific/Guam", "ChST-10"),
    ("Pacific/Port_Moresby", "<+10>-10"),
    ("Pacific/Fiji", "<+12>-12"),
    ("Pacific/Tongatapu", "<+13>-13"),
    ("Pacific/Kiritimati", "<+14>-14"),
];
