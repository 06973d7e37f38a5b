//! Admin dashboard aggregates, computed by full scans on every call.

use std::collections::{BTreeMap, HashMap};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use crate::domain::models::{
    activity::{Activity, ACTION_SIGNUP},
    booking::Booking,
    event::{Event, EVENT_STATUS_ACTIVE, EVENT_STATUS_SOLD_OUT},
    user::User,
};

const ACTIVITY_PER_USER: usize = 5;
const RECENT_ACTIVITY_LIMIT: usize = 10;

pub struct Snapshot<'a> {
    pub events: &'a [Event],
    pub bookings: &'a [Booking],
    pub users: &'a [User],
    pub activities: &'a [Activity],
    pub active_sessions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_events: usize,
    pub total_bookings: usize,
    pub total_revenue: f64,
    pub active_events: usize,
    pub total_users: usize,
    pub active_users: usize,
    pub today_signups: usize,
    pub total_signups: usize,
    pub recent_activity: Vec<Activity>,
}

#[derive(Debug, Serialize, Default)]
pub struct SignupStats {
    pub total: usize,
    pub daily: BTreeMap<String, usize>,
    pub monthly: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: usize,
    pub admin_users: usize,
    pub verified_users: usize,
    pub social_users: usize,
    pub active_sessions: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    pub users: Vec<User>,
    pub stats: UserStats,
    pub signup_stats: SignupStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminEventView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub total_tickets: i32,
    pub available_tickets: i32,
    pub price: f64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub bookings_count: i64,
    pub status: &'static str,
    pub category: String,
    pub capacity: i32,
    pub date: DateTime<Utc>,
}

pub fn compute_stats(snapshot: &Snapshot<'_>, today: NaiveDate) -> AdminStats {
    let signups = signup_stats(snapshot.activities);
    let today_key = today.format("%Y-%m-%d").to_string();

    AdminStats {
        total_events: snapshot.events.len(),
        total_bookings: snapshot.bookings.len(),
        total_revenue: snapshot.bookings.iter().map(|b| b.total_price).sum(),
        active_events: snapshot.events.iter().filter(|e| e.has_tickets_left()).count(),
        total_users: snapshot.users.len(),
        active_users: snapshot.active_sessions,
        today_signups: signups.daily.get(&today_key).copied().unwrap_or(0),
        total_signups: signups.total,
        recent_activity: recent_activity(snapshot.activities),
    }
}

/// Last few entries per user, merged newest first.
pub fn recent_activity(activities: &[Activity]) -> Vec<Activity> {
    let mut per_user: HashMap<&str, Vec<&Activity>> = HashMap::new();
    for activity in activities {
        per_user.entry(activity.user_id.as_str()).or_default().push(activity);
    }

    let mut merged: Vec<Activity> = per_user
        .into_values()
        .flat_map(|mut history| {
            history.sort_by_key(|a| a.timestamp);
            let skip = history.len().saturating_sub(ACTIVITY_PER_USER);
            history.into_iter().skip(skip).cloned().collect::<Vec<_>>()
        })
        .collect();

    merged.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    merged.truncate(RECENT_ACTIVITY_LIMIT);
    merged
}

pub fn signup_stats(activities: &[Activity]) -> SignupStats {
    let mut stats = SignupStats::default();
    for activity in activities.iter().filter(|a| a.action == ACTION_SIGNUP) {
        stats.total += 1;
        *stats.daily.entry(activity.timestamp.format("%Y-%m-%d").to_string()).or_default() += 1;
        *stats.monthly.entry(activity.timestamp.format("%Y-%m").to_string()).or_default() += 1;
    }
    stats
}

pub fn user_analytics(snapshot: &Snapshot<'_>) -> UserAnalytics {
    let users = snapshot.users;
    UserAnalytics {
        stats: UserStats {
            total_users: users.len(),
            admin_users: users.iter().filter(|u| u.is_admin).count(),
            verified_users: users.iter().filter(|u| u.is_email_verified).count(),
            social_users: users.iter().filter(|u| u.is_social()).count(),
            active_sessions: snapshot.active_sessions,
        },
        signup_stats: signup_stats(snapshot.activities),
        users: users.to_vec(),
    }
}

pub fn admin_event_views(events: &[Event], bookings: &[Booking]) -> Vec<AdminEventView> {
    let mut booked: HashMap<&str, i64> = HashMap::new();
    for booking in bookings {
        *booked.entry(booking.event_id.as_str()).or_default() += i64::from(booking.quantity);
    }

    events
        .iter()
        .map(|event| AdminEventView {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            date_time: event.date_time,
            location: event.location.clone(),
            event_type: event.event_type.clone(),
            total_tickets: event.total_tickets,
            available_tickets: event.available_tickets,
            price: event.price,
            image_url: event.image_url.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
            bookings_count: booked.get(event.id.as_str()).copied().unwrap_or(0),
            status: if event.has_tickets_left() { EVENT_STATUS_ACTIVE } else { EVENT_STATUS_SOLD_OUT },
            category: event.event_type.clone(),
            capacity: event.total_tickets,
            date: event.date_time,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::activity::ACTION_LOGIN;
    use crate::domain::models::event::NewEventParams;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn activity_at(user: &str, action: &str, minutes: i64) -> Activity {
        let mut a = Activity::new(user, action, json!({}));
        a.timestamp = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
        a
    }

    fn event(capacity: i32, available: i32) -> Event {
        let mut e = Event::new(NewEventParams {
            title: "Gig".into(),
            description: String::new(),
            date_time: Utc::now(),
            location: "Pune".into(),
            event_type: "Concert".into(),
            capacity,
            price: 100.0,
            image_url: String::new(),
            status: EVENT_STATUS_ACTIVE.into(),
        });
        e.available_tickets = available;
        e
    }

    #[test]
    fn recent_activity_keeps_last_five_per_user_and_ten_overall() {
        let mut log = Vec::new();
        for i in 0..8 {
            log.push(activity_at("alice", ACTION_LOGIN, i));
        }
        for i in 0..8 {
            log.push(activity_at("bob", ACTION_LOGIN, 100 + i));
        }

        let recent = recent_activity(&log);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.iter().filter(|a| a.user_id == "bob").count(), 5);
        assert_eq!(recent.iter().filter(|a| a.user_id == "alice").count(), 5);
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        // alice's oldest three entries were dropped before merging
        assert!(recent.iter().all(|a| a.user_id != "alice" || a.timestamp >= log[3].timestamp));
    }

    #[test]
    fn signup_stats_bucket_by_day_and_month() {
        let log = vec![
            activity_at("a", ACTION_SIGNUP, 0),
            activity_at("b", ACTION_SIGNUP, 60 * 24),
            activity_at("b", ACTION_LOGIN, 60 * 25),
        ];
        let stats = signup_stats(&log);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.daily.get("2025-03-01"), Some(&1));
        assert_eq!(stats.daily.get("2025-03-02"), Some(&1));
        assert_eq!(stats.monthly.get("2025-03"), Some(&2));
    }

    #[test]
    fn stats_sum_revenue_and_count_open_events() {
        let events = vec![event(10, 0), event(10, 4)];
        let bookings = vec![
            Booking::new("u".into(), events[0].id.clone(), 10, 1000.0),
            Booking::new("u".into(), events[1].id.clone(), 6, 600.0),
        ];
        let activities = vec![activity_at("u", ACTION_SIGNUP, 0)];
        let snapshot = Snapshot {
            events: &events,
            bookings: &bookings,
            users: &[],
            activities: &activities,
            active_sessions: 3,
        };

        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let stats = compute_stats(&snapshot, day);
        assert_eq!(stats.total_revenue, 1600.0);
        assert_eq!(stats.active_events, 1);
        assert_eq!(stats.active_users, 3);
        assert_eq!(stats.today_signups, 1);

        let views = admin_event_views(&events, &bookings);
        assert_eq!(views[0].status, EVENT_STATUS_SOLD_OUT);
        assert_eq!(views[1].bookings_count, 6);
        assert_eq!(views[1].capacity, 10);
    }
}
