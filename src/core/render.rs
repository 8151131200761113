use crate::core::change::ChangeKind;
use crate::domain::model::{
    Layout, LinkAction, MenuEntry, MonitoredSource, NotificationMessage, Section,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Who the message appears to come from and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
}

impl Sender {
    fn message(&self, title: String, layout: Layout) -> NotificationMessage {
        NotificationMessage {
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: self.icon_emoji.clone(),
            title,
            body_sections: Vec::new(),
            link_actions: Vec::new(),
            footer: None,
            layout,
        }
    }
}

pub struct PageChange<'a> {
    pub source: &'a MonitoredSource,
    pub previous: Option<u32>,
    pub current: u32,
    pub kind: ChangeKind,
    pub checked_at: NaiveDateTime,
    pub run_url: Option<&'a str>,
}

pub const PAGE: &str = "📄 Sayfa";
pub const CHECKED_AT: &str = "🕐 Tarih";
pub const PREVIOUS_COUNT: &str = "📊 Önceki Sayı";
pub const CURRENT_COUNT: &str = "📈 Yeni Sayı";
pub const DIFFERENCE: &str = "🔥 Fark";

pub fn page_change(sender: &Sender, change: &PageChange<'_>) -> NotificationMessage {
    let name = &change.source.display_name;
    let (headline, color) = match change.kind {
        ChangeKind::Increased { .. } => ("Yeni İçerik Tespit Edildi!", "good"),
        ChangeKind::Decreased { .. } => ("İçerik Kaldırıldı", "warning"),
        ChangeKind::Unchanged => ("Kontrol Edildi, Değişiklik Yok", "#439FE0"),
        ChangeKind::FirstSeen => ("İlk Kontrol Kaydedildi", "#439FE0"),
    };

    let mut message = sender.message(
        format!("🚨 {} - {}", name, headline),
        Layout::Attachment {
            color: color.to_string(),
        },
    );

    let previous = change.previous.unwrap_or(0);
    let difference = i64::from(change.current) - i64::from(previous);

    message.body_sections = vec![
        Section::short(PAGE, name.as_str()),
        Section::short(CHECKED_AT, change.checked_at.format("%d.%m.%Y %H:%M:%S").to_string()),
        Section::short(PREVIOUS_COUNT, previous.to_string()),
        Section::short(CURRENT_COUNT, change.current.to_string()),
        Section::new(DIFFERENCE, format!("{:+} öğe", difference)),
    ];

    message.link_actions.push(LinkAction {
        label: "🔗 Sayfayı Aç".to_string(),
        url: change.source.url.clone(),
        primary: true,
    });
    if let Some(run_url) = change.run_url {
        message.link_actions.push(LinkAction {
            label: "📊 GitHub Actions".to_string(),
            url: run_url.to_string(),
            primary: false,
        });
    }

    message.footer = Some("ÖSYM Takip Sistemi".to_string());
    message
}

fn bullet_list(items: &[String]) -> Option<String> {
    let lines: Vec<String> = items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| format!("• {}", item))
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

pub const SOUPS: &str = "🥣 Çorbalar";
pub const MAINS: &str = "🍖 Ana Yemekler";
pub const SIDES: &str = "🥬 Yan Yemekler";
pub const SALADS: &str = "🥗 Salatalar";
pub const DESSERTS: &str = "🍰 Tatlılar";
pub const CALORIES: &str = "⚡ Kalori";
pub const NOTICE: &str = "📢 Özel Durum";

fn display_date(entry: &MenuEntry, date: NaiveDate) -> String {
    entry
        .date
        .clone()
        .unwrap_or_else(|| date.format("%d.%m.%Y").to_string())
}

/// Full menu, or the short notice form when the entry carries a special notice.
pub fn menu(sender: &Sender, entry: &MenuEntry, date: NaiveDate) -> NotificationMessage {
    let shown_date = display_date(entry, date);

    if let Some(notice) = entry.notice() {
        let mut message = sender.message(format!("📢 {} - Bugün Normal Menü Yok", shown_date), Layout::Text);
        message.body_sections.push(Section::new(NOTICE, notice));
        return message;
    }

    let mut message = sender.message(format!("🍽️ {} - Bugünün Menüsü", shown_date), Layout::Blocks);

    let categories = [
        (SOUPS, &entry.soups),
        (MAINS, &entry.mains),
        (SIDES, &entry.sides),
        (SALADS, &entry.salads),
        (DESSERTS, &entry.desserts),
    ];
    for (label, items) in categories {
        if let Some(text) = bullet_list(items) {
            message.body_sections.push(Section::new(label, text));
        }
    }

    if let Some(calories) = &entry.calories {
        message.body_sections.push(Section::short(CALORIES, calories.as_str()));
    }

    message.footer = Some("🤖 Ofis Yemek Bot | Afiyet olsun! 😋".to_string());
    message
}

pub fn no_service(sender: &Sender, date: NaiveDate) -> NotificationMessage {
    let mut message = sender.message(
        format!("📅 {} - Bugün Yemek Servisi Yok", date.format("%d.%m.%Y")),
        Layout::Text,
    );
    message
        .body_sections
        .push(Section::new("", "Hafta sonu yemekhane kapalıdır."));
    message
}

pub fn no_data(sender: &Sender, date: NaiveDate) -> NotificationMessage {
    let mut message = sender.message(
        format!("❓ {} - Menü Bilgisi Bulunamadı", date.format("%d.%m.%Y")),
        Layout::Text,
    );
    message.body_sections.push(Section::new(
        "",
        "Menü dosyasında bu tarih için kayıt yok.",
    ));
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender() -> Sender {
        Sender {
            channel: "#ogle-yemegi".to_string(),
            username: "Yemek Bot 🍽️".to_string(),
            icon_emoji: ":fork_and_knife:".to_string(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    #[test]
    fn test_menu_omits_empty_categories() {
        let entry = MenuEntry {
            mains: vec!["Tavuk Sote".to_string(), "Karnıyarık".to_string()],
            soups: vec!["Mercimek".to_string()],
            ..Default::default()
        };

        let message = menu(&sender(), &entry, day());

        assert_eq!(message.layout, Layout::Blocks);
        assert_eq!(message.title, "🍽️ 10.06.2024 - Bugünün Menüsü");
        let labels: Vec<&str> = message.body_sections.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec![SOUPS, MAINS]);
        assert_eq!(message.section(MAINS).unwrap().text, "• Tavuk Sote\n• Karnıyarık");
        assert!(message.section(DESSERTS).is_none());
    }

    #[test]
    fn test_menu_drops_blank_items_and_adds_calories() {
        let entry = MenuEntry {
            date: Some("10 Haziran".to_string()),
            desserts: vec!["".to_string(), "  ".to_string()],
            salads: vec!["Çoban".to_string(), "".to_string()],
            calories: Some("950 kcal".to_string()),
            ..Default::default()
        };

        let message = menu(&sender(), &entry, day());

        assert!(message.title.starts_with("🍽️ 10 Haziran"));
        assert!(message.section(DESSERTS).is_none());
        assert_eq!(message.section(SALADS).unwrap().text, "• Çoban");
        assert_eq!(message.body_sections.last().unwrap().label, CALORIES);
    }

    #[test]
    fn test_special_notice_replaces_full_menu() {
        let entry = MenuEntry {
            mains: vec!["Köfte".to_string()],
            special_notice: Some("Resmi tatil".to_string()),
            ..Default::default()
        };

        let message = menu(&sender(), &entry, day());

        assert_eq!(message.layout, Layout::Text);
        assert_eq!(message.body_sections.len(), 1);
        assert_eq!(message.section(NOTICE).unwrap().text, "Resmi tatil");
        assert!(message.section(MAINS).is_none());
    }

    #[test]
    fn test_fallback_messages_differ() {
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(no_service(&sender(), saturday).title.contains("Yemek Servisi Yok"));
        assert!(no_data(&sender(), day()).title.contains("Menü Bilgisi Bulunamadı"));
    }

    #[test]
    fn test_page_change_fields_and_actions() {
        let source = MonitoredSource::new("https://example.com/list.html", "YKS Duyurular");
        let checked_at = day().and_hms_opt(9, 30, 0).unwrap();
        let change = PageChange {
            source: &source,
            previous: Some(5),
            current: 7,
            kind: ChangeKind::Increased { by: 2 },
            checked_at,
            run_url: Some("https://github.com/acme/watch/actions/runs/42"),
        };

        let message = page_change(&sender(), &change);

        assert_eq!(message.title, "🚨 YKS Duyurular - Yeni İçerik Tespit Edildi!");
        assert_eq!(message.section(DIFFERENCE).unwrap().text, "+2 öğe");
        assert_eq!(message.section(CHECKED_AT).unwrap().text, "10.06.2024 09:30:00");
        assert_eq!(message.link_actions.len(), 2);
        assert!(message.link_actions[0].primary);
        assert_eq!(message.link_actions[0].url, "https://example.com/list.html");
    }

    #[test]
    fn test_page_change_without_previous_count() {
        let source = MonitoredSource::new("https://example.com/a", "A");
        let change = PageChange {
            source: &source,
            previous: None,
            current: 3,
            kind: ChangeKind::FirstSeen,
            checked_at: day().and_hms_opt(8, 0, 0).unwrap(),
            run_url: None,
        };

        let message = page_change(&sender(), &change);

        assert_eq!(message.section(PREVIOUS_COUNT).unwrap().text, "0");
        assert_eq!(message.section(DIFFERENCE).unwrap().text, "+3 öğe");
        assert_eq!(message.link_actions.len(), 1);
    }
}
