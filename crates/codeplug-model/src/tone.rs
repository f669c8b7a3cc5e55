//! The fixed set of tones accepted on analog channels: standard CTCSS
//! frequencies plus DCS codes in both normal and inverted polarity.

use std::collections::HashSet;
use std::sync::LazyLock;

const CTCSS_TONES: &[&str] = &[
    "67.0", "69.3", "71.9", "74.4", "77.0", "79.7", "82.5", "85.4", "88.5", "91.5", "94.8",
    "97.4", "100.0", "103.5", "107.2", "110.9", "114.8", "118.8", "123.0", "127.3", "131.8",
    "136.5", "141.3", "146.2", "151.4", "156.7", "159.8", "162.2", "165.5", "167.9", "171.3",
    "173.8", "177.3", "179.9", "183.5", "186.2", "189.9", "192.8", "196.6", "199.5", "203.5",
    "206.5", "210.7", "218.1", "225.7", "229.1", "233.6", "241.8", "250.3", "254.1",
];

const DCS_CODES: &[&str] = &[
    "023", "025", "026", "031", "032", "036", "043", "047", "051", "053", "054", "065", "071",
    "072", "073", "074", "114", "115", "116", "122", "125", "131", "132", "134", "143", "145",
    "152", "155", "156", "162", "165", "172", "174", "205", "212", "223", "225", "226", "243",
    "244", "245", "246", "251", "252", "255", "261", "263", "265", "266", "271", "274", "306",
    "311", "315", "325", "331", "332", "343", "346", "351", "356", "364", "365", "371", "411",
    "412", "413", "423", "431", "432", "445", "446", "452", "454", "455", "462", "464", "465",
    "466", "503", "506", "516", "523", "526", "532", "546", "565", "606", "612", "624", "627",
    "631", "632", "654", "662", "664", "703", "712", "723", "731", "732", "734", "743", "754",
];

static VALID_TONES: LazyLock<HashSet<String>> = LazyLock::new(|| {
    let mut tones: HashSet<String> = CTCSS_TONES.iter().map(|t| (*t).to_string()).collect();
    for code in DCS_CODES {
        tones.insert(format!("D{code}N"));
        tones.insert(format!("D{code}I"));
    }
    tones
});

/// Normalize a raw tone field: numeric values are reformatted with at least
/// one decimal place ("88.50" -> "88.5", "100" -> "100.0"), everything else
/// is uppercased.
pub fn normalize_tone(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        if value.fract() == 0.0 {
            return format!("{value:.1}");
        }
        return format!("{value}");
    }
    trimmed.to_uppercase()
}

/// Whether a normalized tone is in the known CTCSS/DCS set.
pub fn is_valid_tone(tone: &str) -> bool {
    VALID_TONES.contains(tone)
}
