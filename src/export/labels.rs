//! Display labels of exported pages.
//!
//! Two presets ship with the crate, French (the default) and Arabic. Either
//! can be overridden key by key from the `[labels]` table of the config file.

use serde::{Deserialize, Serialize};

use super::text::TextDirection;
use crate::models::{Day, Period};

/// Text printed around the schedule grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Document direction; RTL mirrors every table.
    pub direction: TextDirection,
    /// Day names, Monday first.
    pub days: Vec<String>,
    pub morning: String,
    pub afternoon: String,
    /// Corner header of single-entity tables.
    pub day_hour: String,
    /// Corner header of the teachers-as-rows aggregate.
    pub teacher: String,
    /// Corner header of the days-as-rows aggregate.
    pub day_period_hour: String,
    pub schedule_title: String,
    pub global_title: String,
    /// Prefix of a teacher's main subject in the title.
    pub teacher_prefix: String,
    pub room_prefix: String,
    pub vacant_title: String,
    pub school_year: String,
    pub subject: String,
    pub classes: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self::french()
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Labels {
    /// French labels, left to right.
    pub fn french() -> Self {
        Self {
            direction: TextDirection::Ltr,
            days: owned(&["Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi"]),
            morning: "Matin".into(),
            afternoon: "Après-midi".into(),
            day_hour: "Jour / Heure".into(),
            teacher: "Enseignant".into(),
            day_period_hour: "Jour/Période/Heure".into(),
            schedule_title: "Emploi du temps".into(),
            global_title: "Emploi du temps global".into(),
            teacher_prefix: "Prof.".into(),
            room_prefix: "Salle".into(),
            vacant_title: "Salles vacantes".into(),
            school_year: "Année scolaire".into(),
            subject: "Matière".into(),
            classes: "Classes".into(),
        }
    }

    /// Arabic labels, right to left.
    pub fn arabic() -> Self {
        Self {
            direction: TextDirection::Rtl,
            days: owned(&["الاثنين", "الثلاثاء", "الأربعاء", "الخميس", "الجمعة", "السبت"]),
            morning: "الفترة الصباح".into(),
            afternoon: "الفترة المساء".into(),
            day_hour: "الساعة / اليوم".into(),
            teacher: "المدرس".into(),
            day_period_hour: "اليوم/الفترة/الساعة".into(),
            schedule_title: "التوزيع الأسبوعي".into(),
            global_title: "التوزيع الأسبوعي العام".into(),
            teacher_prefix: "أستاذ(ة) مادة".into(),
            room_prefix: "القاعة".into(),
            vacant_title: "القاعات الشاغرة".into(),
            school_year: "السنة الدراسية".into(),
            subject: "المادة".into(),
            classes: "الأقسام".into(),
        }
    }

    /// Display name of a day; falls back to the wire name.
    pub fn day(&self, day: Day) -> &str {
        self.days
            .get(day.index())
            .map(String::as_str)
            .unwrap_or_else(|| day.wire_name())
    }

    /// Display name of a period.
    pub fn period(&self, period: Period) -> &str {
        match period {
            Period::Morning => &self.morning,
            Period::Afternoon => &self.afternoon,
        }
    }
}
