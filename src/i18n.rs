/// Serbian and English message catalogue

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "sr")]
    Serbian,
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Serbian => "sr",
            Language::English => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code.trim().to_lowercase().as_str() {
            "sr" => Some(Language::Serbian),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    /// Pick a language from the browser UI locale (`sr-RS`, `hr`, `en-US`, ...)
    pub fn detect(ui_language: &str) -> Language {
        let lower = ui_language.to_lowercase();
        if ["sr", "hr", "bs"].iter().any(|p| lower.starts_with(p)) {
            Language::Serbian
        } else {
            Language::English
        }
    }

    /// BCP 47 tag for date formatting
    pub fn locale(self) -> &'static str {
        match self {
            Language::Serbian => "sr-RS",
            Language::English => "en-US",
        }
    }
}

/// Short local date in the language's customary layout
pub fn format_date(date: &DateTime<FixedOffset>, lang: Language) -> String {
    match lang {
        Language::Serbian => date.format("%-d. %-m. %Y.").to_string(),
        Language::English => date.format("%-m/%-d/%Y").to_string(),
    }
}

const SERBIAN_MONTHS: [&str; 12] = [
    "januar", "februar", "mart", "april", "maj", "jun", "jul", "avgust", "septembar", "oktobar",
    "novembar", "decembar",
];

/// Heading of a history day: today, yesterday or the long date
pub fn day_label(date: NaiveDate, today: NaiveDate, lang: Language) -> String {
    if date == today {
        return translate(&Message::Today, lang);
    }
    if today.pred_opt() == Some(date) {
        return translate(&Message::Yesterday, lang);
    }
    match lang {
        Language::Serbian => {
            let month = SERBIAN_MONTHS[date.month0() as usize];
            format!("{}. {} {}.", date.day(), month, date.year())
        }
        Language::English => date.format("%B %-d, %Y").to_string(),
    }
}

pub fn format_time(date: &DateTime<FixedOffset>) -> String {
    date.format("%H:%M").to_string()
}

/// User-facing text
#[derive(Debug, Clone, PartialEq)]
pub enum Message<'a> {
    NotOnProfile,
    HandleNotFound,
    AlreadyBlocked(&'a str),
    Blocked(&'a str),
    BlockFailed(&'a str),
    BlockError,
    BlockInProgress,
    BlockedViaExtension,
    ContextMenuReason,
    Imported { added: usize, skipped: usize },
    NothingToImport,
    NothingToExport,
    Exported,
    BackupCreated,
    ConfirmDeleteAll,
    ConfirmBulkDelete(usize),
    AllDeleted,
    NoTags,
    SearchPlaceholder,
    Today,
    Yesterday,
    AccountCount(usize),
    NoHistory,
    NotificationsSetting,
    AutoCloseSetting,
    SettingsSaved,
}

pub fn translate(message: &Message<'_>, lang: Language) -> String {
    use Language::*;
    use Message::*;

    match (message, lang) {
        (NotOnProfile, Serbian) => "Niste na stranici profila".to_string(),
        (NotOnProfile, English) => "Not on a profile page".to_string(),
        (HandleNotFound, Serbian) => "Nije moguće pronaći korisničko ime".to_string(),
        (HandleNotFound, English) => "Unable to find username".to_string(),
        (AlreadyBlocked(h), Serbian) => format!("⚠️ {} je već blokiran", h),
        (AlreadyBlocked(h), English) => format!("⚠️ {} is already blocked", h),
        (Blocked(h), Serbian) => format!("✓ Blokiran {}", h),
        (Blocked(h), English) => format!("✓ Blocked {}", h),
        (BlockFailed(h), Serbian) => format!("✗ Blokiranje nije uspelo za {}", h),
        (BlockFailed(h), English) => format!("✗ Failed to block {}", h),
        (BlockError, Serbian) => "✗ Greška pri blokiranju".to_string(),
        (BlockError, English) => "✗ Error during blocking".to_string(),
        (BlockInProgress, Serbian) => "Blokiranje je već u toku".to_string(),
        (BlockInProgress, English) => "A block is already in progress".to_string(),
        (BlockedViaExtension, Serbian) => "Blokirano preko ekstenzije".to_string(),
        (BlockedViaExtension, English) => "Blocked via extension".to_string(),
        (ContextMenuReason, Serbian) => "Blokiran preko kontekstnog menija".to_string(),
        (ContextMenuReason, English) => "Blocked via context menu".to_string(),
        (Imported { added, skipped }, Serbian) => {
            format!("Uspešno importovano {} korisnika, {} preskočeno", added, skipped)
        }
        (Imported { added, skipped }, English) => {
            format!("Imported {} accounts, {} skipped", added, skipped)
        }
        (NothingToImport, Serbian) => "Nema validnih korisnika za import".to_string(),
        (NothingToImport, English) => "No valid accounts to import".to_string(),
        (NothingToExport, Serbian) => "Nema blokiranih korisnika za export".to_string(),
        (NothingToExport, English) => "No blocked accounts to export".to_string(),
        (Exported, Serbian) => "✅ Lista uspešno exportovana".to_string(),
        (Exported, English) => "✅ List exported".to_string(),
        (BackupCreated, Serbian) => "✅ Backup uspešno kreiran".to_string(),
        (BackupCreated, English) => "✅ Backup created".to_string(),
        (ConfirmDeleteAll, Serbian) => "Obrisati sve blokirane korisnike?".to_string(),
        (ConfirmDeleteAll, English) => "Delete every blocked account?".to_string(),
        (ConfirmBulkDelete(n), Serbian) => format!("Obrisati {} izabranih korisnika?", n),
        (ConfirmBulkDelete(n), English) => format!("Delete {} selected accounts?", n),
        (AllDeleted, Serbian) => "Svi korisnici obrisani".to_string(),
        (AllDeleted, English) => "All accounts deleted".to_string(),
        (NoTags, Serbian) => "Nema tagova".to_string(),
        (NoTags, English) => "No tags".to_string(),
        (SearchPlaceholder, Serbian) => "Pretraži korisnike...".to_string(),
        (SearchPlaceholder, English) => "Search accounts...".to_string(),
        (Today, Serbian) => "Danas".to_string(),
        (Today, English) => "Today".to_string(),
        (Yesterday, Serbian) => "Juče".to_string(),
        (Yesterday, English) => "Yesterday".to_string(),
        (AccountCount(1), Serbian) => "1 korisnik".to_string(),
        (AccountCount(n), Serbian) => format!("{} korisnika", n),
        (AccountCount(1), English) => "1 account".to_string(),
        (AccountCount(n), English) => format!("{} accounts", n),
        (NoHistory, Serbian) => "Istorija blokiranja je prazna".to_string(),
        (NoHistory, English) => "Blocking history is empty".to_string(),
        (NotificationsSetting, Serbian) => "Obaveštenja na stranici".to_string(),
        (NotificationsSetting, English) => "On-page notifications".to_string(),
        (AutoCloseSetting, Serbian) => "Zatvori popup posle akcije".to_string(),
        (AutoCloseSetting, English) => "Close popup after an action".to_string(),
        (SettingsSaved, Serbian) => "Podešavanja sačuvana".to_string(),
        (SettingsSaved, English) => "Settings saved".to_string(),
    }
}
