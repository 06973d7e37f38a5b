use chrono::{DateTime, TimeZone, Utc};
use tracing::info;
use crate::domain::models::{
    event::{Event, EVENT_STATUS_ACTIVE},
    user::{User, EMAIL_PROVIDER},
};
use crate::domain::services::auth_service::hash_password;
use crate::error::AppError;
use crate::state::AppState;

pub const DEMO_USER_EMAIL: &str = "test@example.com";
pub const DEMO_USER_PASSWORD: &str = "password123";
pub const DEMO_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";

struct SampleEvent {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    date_time: (i32, u32, u32, u32),
    location: &'static str,
    event_type: &'static str,
    total: i32,
    available: i32,
    price: f64,
    image_url: &'static str,
}

const SAMPLE_EVENTS: &[SampleEvent] = &[
    SampleEvent {
        id: "1",
        title: "React Developer Conference 2025",
        description: "Join us for the biggest React conference of the year! Learn about the latest features, best practices, and connect with fellow developers.",
        date_time: (2025, 3, 15, 10),
        location: "Bangalore International Exhibition Centre, Bangalore",
        event_type: "Conference",
        total: 500,
        available: 350,
        price: 2500.0,
        image_url: "https://images.unsplash.com/photo-1540575467063-178a50c2df87?auto=format&fit=crop&w=1000&q=80",
    },
    SampleEvent {
        id: "2",
        title: "Classical Music Concert",
        description: "An enchanting evening of classical music featuring renowned Indian and international musicians.",
        date_time: (2025, 2, 28, 20),
        location: "NCPA Theatre, Mumbai",
        event_type: "Concert",
        total: 150,
        available: 75,
        price: 1200.0,
        image_url: "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?auto=format&fit=crop&w=1000&q=80",
    },
    SampleEvent {
        id: "3",
        title: "Digital Marketing Workshop",
        description: "Master the art of digital marketing with hands-on workshops covering SEO, social media, and content strategy.",
        date_time: (2025, 3, 5, 9),
        location: "WeWork, Cyber City, Gurgaon",
        event_type: "Workshop",
        total: 50,
        available: 25,
        price: 1500.0,
        image_url: "https://images.unsplash.com/photo-1552664730-d307ca884978?auto=format&fit=crop&w=1000&q=80",
    },
    SampleEvent {
        id: "4",
        title: "IPL Cricket Match",
        description: "Experience the thrill of live cricket with this exciting IPL match between top teams!",
        date_time: (2025, 4, 12, 19),
        location: "M. Chinnaswamy Stadium, Bangalore",
        event_type: "Sports",
        total: 20000,
        available: 15000,
        price: 800.0,
        image_url: "https://images.unsplash.com/photo-1546519638-68e109498ffc?auto=format&fit=crop&w=1000&q=80",
    },
    SampleEvent {
        id: "5",
        title: "Contemporary Art Exhibition",
        description: "Discover stunning contemporary art from emerging Indian artists at this exclusive gallery opening.",
        date_time: (2025, 3, 20, 18),
        location: "National Gallery of Modern Art, Delhi",
        event_type: "Arts & Culture",
        total: 200,
        available: 180,
        price: 300.0,
        image_url: "https://images.unsplash.com/photo-1578321272176-b7bbc0679853?auto=format&fit=crop&w=1000&q=80",
    },
];

/// Loads the demo accounts and sample catalogue once. Seeding is skipped when
/// the admin account already exists (e.g. a reopened SQLite file).
pub async fn seed_demo_data(state: &AppState) -> Result<(), AppError> {
    if state.user_repo.find_by_email(DEMO_ADMIN_EMAIL).await?.is_some() {
        info!("Demo data already present, skipping seed");
        return Ok(());
    }

    info!("Initializing sample data...");
    let now = Utc::now();

    let accounts = [
        ("test-user-123", DEMO_USER_EMAIL, DEMO_USER_PASSWORD, "Test", false),
        ("admin-user-123", DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, "Admin", true),
    ];
    for (id, email, password, first_name, is_admin) in accounts {
        let user = User {
            id: id.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            first_name: first_name.to_string(),
            last_name: "User".to_string(),
            is_admin,
            created_at: now,
            last_login: None,
            login_count: 0,
            is_email_verified: false,
            auth_provider: EMAIL_PROVIDER.to_string(),
        };
        state.user_repo.create(&user).await?;
    }

    for sample in SAMPLE_EVENTS {
        let event = Event {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            date_time: sample_time(sample.date_time)?,
            location: sample.location.to_string(),
            event_type: sample.event_type.to_string(),
            total_tickets: sample.total,
            available_tickets: sample.available,
            price: sample.price,
            image_url: sample.image_url.to_string(),
            status: EVENT_STATUS_ACTIVE.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.event_repo.create(&event).await?;
    }

    info!("Sample data initialized successfully");
    Ok(())
}

fn sample_time((year, month, day, hour): (i32, u32, u32, u32)) -> Result<DateTime<Utc>, AppError> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalWithMsg(format!("Invalid sample date {}-{}-{}", year, month, day)))
}
