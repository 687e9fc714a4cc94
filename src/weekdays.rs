use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Recurrence flags for a weekly course slot, one per day of the week.
///
/// Field names match the course records returned by the catalog, so the
/// flags can be flattened straight into a course payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveWeekdays {
    #[serde(default)]
    pub sunday: bool,
    #[serde(default)]
    pub monday: bool,
    #[serde(default)]
    pub tuesday: bool,
    #[serde(default)]
    pub wednesday: bool,
    #[serde(default)]
    pub thursday: bool,
    #[serde(default)]
    pub friday: bool,
    #[serde(default)]
    pub saturday: bool,
}

impl ActiveWeekdays {
    /// Sunday-first, matching `Weekday::num_days_from_sunday`.
    pub const ORDER: [Weekday; 7] = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ];

    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::from_days(Self::ORDER)
    }

    pub fn from_days<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        let mut flags = Self::none();
        for day in days {
            flags.set(day, true);
        }
        flags
    }

    pub fn set(&mut self, day: Weekday, active: bool) {
        *self.flag_mut(day) = active;
    }

    pub fn is_active(&self, day: Weekday) -> bool {
        match day.num_days_from_sunday() {
            0 => self.sunday,
            1 => self.monday,
            2 => self.tuesday,
            3 => self.wednesday,
            4 => self.thursday,
            5 => self.friday,
            _ => self.saturday,
        }
    }

    pub fn active_days(&self) -> Vec<Weekday> {
        Self::ORDER
            .into_iter()
            .filter(|day| self.is_active(*day))
            .collect()
    }

    pub fn count(&self) -> usize {
        Self::ORDER
            .iter()
            .filter(|day| self.is_active(**day))
            .count()
    }

    fn flag_mut(&mut self, day: Weekday) -> &mut bool {
        match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        }
    }
}
