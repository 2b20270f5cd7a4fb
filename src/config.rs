//! Compiled-in page configuration
//!
//! Everything the profile card renders comes from the static tables in this
//! module: profile info, social entries, the three link sections, the music
//! player's playlist source coordinates, share caption and the translation
//! table. Edit the values here and rebuild; there is no runtime configuration.

use ratatui::style::Color;

use crate::model::Language;

/// Profile header information
pub struct ProfileConfig {
    pub name: &'static str,
    pub full_name: &'static str,
    pub profile_url: &'static str,
    pub profile_image: &'static str,
}

pub const PROFILE: ProfileConfig = ProfileConfig {
    name: "YARDAN SHAQ",
    full_name: "Yardan Shaquille H.",
    profile_url: "https://github.com/yardanshaq",
    profile_image: "https://avatars.githubusercontent.com/u/139103935?v=4",
};

/// The public URL this card lives at; share targets and the QR code point here.
pub const PAGE_URL: &str = "https://www.yardansh.xyz";

/// Caption attached to outbound share links
pub const SHARE_TEXT: &str = "Yardan Shaquille H. - Fullstack Developer";

/// Where the player's playlist document comes from.
///
/// When `gist_id` is set the playlist is fetched from the raw gist URL,
/// otherwise from a `songs.json` file next to the binary. Both shapes of
/// document are accepted (bare array or `{ "songs": [...] }`).
pub struct MusicConfig {
    pub gist_user: &'static str,
    pub gist_id: &'static str,
    pub gist_file: &'static str,
    pub local_file: &'static str,
}

pub const MUSIC: MusicConfig = MusicConfig {
    gist_user: "yardanshaq",
    gist_id: "daf658c28c6efa59d22565988431c866",
    gist_file: "playlist",
    local_file: "songs.json",
};

/// A social-icon entry under the profile header
pub struct SocialEntry {
    pub name: &'static str,
    pub url: &'static str,
    pub glyph: &'static str,
    pub color: Color,
}

pub const SOCIALS: &[SocialEntry] = &[
    SocialEntry {
        name: "TikTok",
        url: "https://www.tiktok.com/@yardanshaq",
        glyph: "♪",
        color: Color::White,
    },
    SocialEntry {
        name: "X / Twitter",
        url: "https://x.com/yardanshaq",
        glyph: "𝕏",
        color: Color::White,
    },
    SocialEntry {
        name: "Instagram",
        url: "https://instagram.com/shaqsyr",
        glyph: "◉",
        color: Color::Magenta,
    },
];

/// One row in a link section
pub struct LinkEntry {
    pub title: &'static str,
    pub label: &'static str,
    pub href: &'static str,
    pub color: Color,
}

pub const ABOUT_LINKS: &[LinkEntry] = &[
    LinkEntry {
        title: "Portfolio Website",
        label: "yardansh.xyz",
        href: "https://www.yardansh.xyz",
        color: Color::Red,
    },
    LinkEntry {
        title: "CV / Resume Online",
        label: "CV PDF",
        href: "https://www.yardansh.xyz/cv/CV%20Yardan.pdf",
        color: Color::Green,
    },
    LinkEntry {
        title: "Certificates",
        label: "certificates",
        href: "#",
        color: Color::Blue,
    },
];

pub const PROJECT_LINKS: &[LinkEntry] = &[
    LinkEntry {
        title: "GitHub Projects",
        label: "github.com/yardanshaq",
        href: "https://github.com/yardanshaq",
        color: Color::DarkGray,
    },
    LinkEntry {
        title: "Weather App",
        label: "Real-time Weather Forecast",
        href: "https://www.yardansh.xyz/weather",
        color: Color::Cyan,
    },
    LinkEntry {
        title: "Digital Payment",
        label: "E-Wallet Payment Gateway",
        href: "https://www.yardansh.xyz/payment",
        color: Color::LightRed,
    },
    LinkEntry {
        title: "Brat Generator",
        label: "Aesthetic Image Generator",
        href: "https://www.yardansh.xyz/brat",
        color: Color::LightMagenta,
    },
    LinkEntry {
        title: "Photobooth Online",
        label: "Web-based Photo Capture",
        href: "https://www.yardansh.xyz/photobooth",
        color: Color::Magenta,
    },
    LinkEntry {
        title: "CDN & Shortlink",
        label: "Content Delivery Network",
        href: "https://www.kiracloud.my.id",
        color: Color::Blue,
    },
    LinkEntry {
        title: "Media Downloader",
        label: "Social Media Download Tool",
        href: "https://www.kiracloud.my.id/downloader",
        color: Color::Green,
    },
];

pub const CONTACT_LINKS: &[LinkEntry] = &[
    LinkEntry {
        title: "Email",
        label: "gg@yardansh.xyz",
        href: "mailto:gg@yardansh.xyz",
        color: Color::Red,
    },
    LinkEntry {
        title: "Buy Me a Coffee",
        label: "buymeacoffee.com/-",
        href: "#",
        color: Color::LightRed,
    },
    LinkEntry {
        title: "Form Collaboration",
        label: "google form / notion form",
        href: "#",
        color: Color::Magenta,
    },
];

/// All user-visible strings for one language
pub struct Strings {
    pub greeting: &'static str,
    pub marquee: &'static str,
    pub about: &'static str,
    pub projects: &'static str,
    pub contact: &'static str,
    pub music_section: &'static str,
    pub share_title: &'static str,
    pub share_subtitle: &'static str,
    pub qr_title: &'static str,
    pub qr_subtitle: &'static str,
    pub close: &'static str,
    pub download: &'static str,
    pub loading_text: &'static str,
    pub copied_toast: &'static str,
}

const STRINGS_ID: Strings = Strings {
    greeting: "Fullstack Developer | Open Source Enthusiast",
    marquee: "SELAMAT DATANG DI LINK BIO SAYA! • JELAJAHI PORTFOLIO & PROJECT SAYA",
    about: "Tentang Saya",
    projects: "Project & Karya",
    contact: "Kontak",
    music_section: "Albumku",
    share_title: "Share Link",
    share_subtitle: "Share project ini ke teman-temanmu",
    qr_title: "QR Code",
    qr_subtitle: "Scan untuk mengunjungi link bio",
    close: "Tutup",
    download: "Download QR Code",
    loading_text: "Memuat konten...",
    copied_toast: "Link berhasil disalin!",
};

const STRINGS_EN: Strings = Strings {
    greeting: "Fullstack Developer | Open Source Enthusiast",
    marquee: "WELCOME TO MY LINK BIO! • EXPLORE MY PORTFOLIO & PROJECTS",
    about: "About Me",
    projects: "Projects & Works",
    contact: "Contact",
    music_section: "My Album",
    share_title: "Share Link",
    share_subtitle: "Choose platform to share",
    qr_title: "QR Code",
    qr_subtitle: "Scan to visit link bio",
    close: "Close",
    download: "Download QR Code",
    loading_text: "Loading content...",
    copied_toast: "Link copied!",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::Id => &STRINGS_ID,
        Language::En => &STRINGS_EN,
    }
}

/// Footer line with the current year
pub fn footer() -> String {
    use chrono::Datelike;
    format!("© {} {}.", chrono::Local::now().year(), PROFILE.name)
}

/// Raw URL of the hosted playlist document, or None when using the local file
pub fn playlist_gist_url() -> Option<String> {
    if MUSIC.gist_id.is_empty() {
        return None;
    }
    Some(format!(
        "https://gist.githubusercontent.com/{}/{}/raw/{}",
        MUSIC.gist_user, MUSIC.gist_id, MUSIC.gist_file
    ))
}
