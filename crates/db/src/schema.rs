use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

/// Statements run in order; each one is idempotent.
const SCHEMA: &[(&str, &str)] = &[
    (
        "countries",
        r#"
        CREATE TABLE IF NOT EXISTS countries (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            code VARCHAR(8) NOT NULL
        );
        "#,
    ),
    (
        "cities",
        r#"
        CREATE TABLE IF NOT EXISTS cities (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            country_id UUID NOT NULL REFERENCES countries(id) ON DELETE RESTRICT,
            timezone VARCHAR(64) NOT NULL DEFAULT ''
        );
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            tg_id BIGINT NOT NULL,
            username VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL CHECK (role IN ('master', 'client')),
            photo_url TEXT NOT NULL DEFAULT '',
            city_id UUID NOT NULL REFERENCES cities(id) ON DELETE RESTRICT,
            ton_wallet VARCHAR(255) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "master_profiles",
        r#"
        CREATE TABLE IF NOT EXISTS master_profiles (
            id UUID PRIMARY KEY,
            user_id UUID NULL REFERENCES users(id) ON DELETE RESTRICT,
            qr_code VARCHAR(255) NOT NULL,
            bio TEXT NOT NULL DEFAULT '',
            status VARCHAR(32) NOT NULL DEFAULT 'active',
            rating DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (rating >= 0 AND rating <= 5),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "service_categories",
        r#"
        CREATE TABLE IF NOT EXISTS service_categories (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL
        );
        "#,
    ),
    (
        "services",
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY,
            category_id UUID NULL REFERENCES service_categories(id) ON DELETE SET NULL,
            user_id UUID NULL REFERENCES users(id) ON DELETE RESTRICT,
            title VARCHAR(255) NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            photo_url TEXT NOT NULL DEFAULT '',
            price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
            duration VARCHAR(64) NOT NULL DEFAULT '',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "bookings",
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY,
            client_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
            master_id UUID NOT NULL REFERENCES users(id) ON DELETE RESTRICT,
            service_id UUID NOT NULL REFERENCES services(id) ON DELETE RESTRICT,
            booking_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL
                CHECK (status IN ('pending', 'confirmed', 'completed', 'canceled')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "schedule_slots",
        r#"
        CREATE TABLE IF NOT EXISTS schedule_slots (
            id UUID PRIMARY KEY,
            master_id UUID NOT NULL REFERENCES master_profiles(id) ON DELETE CASCADE,
            booking_id UUID NULL REFERENCES bookings(id) ON DELETE SET NULL,
            date DATE NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL
                CHECK (status IN ('free', 'busy', 'booked', 'reserved')),
            slot_type VARCHAR(16) NOT NULL DEFAULT 'manual'
                CHECK (slot_type IN ('manual', 'auto')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_slot_range CHECK (end_time > start_time)
        );
        "#,
    ),
    (
        "payments",
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id UUID PRIMARY KEY,
            client_id UUID NULL REFERENCES users(id) ON DELETE RESTRICT,
            master_id UUID NULL REFERENCES users(id) ON DELETE RESTRICT,
            amount DOUBLE PRECISION NOT NULL CHECK (amount > 0),
            currency VARCHAR(16) NOT NULL DEFAULT '',
            payment_type VARCHAR(16) NOT NULL CHECK (payment_type IN ('payment', 'tip')),
            ton_transaction_id VARCHAR(255) NOT NULL DEFAULT '',
            status VARCHAR(16) NOT NULL CHECK (status IN ('pending', 'completed', 'failed')),
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "reviews",
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id UUID PRIMARY KEY,
            booking_id UUID NOT NULL REFERENCES bookings(id) ON DELETE CASCADE,
            rating INTEGER NOT NULL CHECK (rating >= 1 AND rating <= 5),
            comment TEXT NOT NULL DEFAULT ''
        );
        "#,
    ),
    (
        "subscriptions",
        r#"
        CREATE TABLE IF NOT EXISTS subscriptions (
            id UUID PRIMARY KEY,
            client_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            master_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "my_masters",
        r#"
        CREATE TABLE IF NOT EXISTS my_masters (
            id UUID PRIMARY KEY,
            client_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            master_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    ),
    (
        "user_preferences",
        r#"
        CREATE TABLE IF NOT EXISTS user_preferences (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            preferred_category_id UUID NULL
                REFERENCES service_categories(id) ON DELETE SET NULL,
            max_price DOUBLE PRECISION NOT NULL DEFAULT 0 CHECK (max_price >= 0),
            max_distance_km INTEGER NOT NULL DEFAULT 0 CHECK (max_distance_km >= 0)
        );
        "#,
    ),
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_schedule_slots_master_start ON schedule_slots(master_id, start_time)",
    "CREATE INDEX IF NOT EXISTS idx_schedule_slots_booking_id ON schedule_slots(booking_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_client_id ON bookings(client_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_master_id ON bookings(master_id)",
    "CREATE INDEX IF NOT EXISTS idx_services_user_id ON services(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_services_category_id ON services(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_master_profiles_user_id ON master_profiles(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_booking_id ON reviews(booking_id)",
    "CREATE INDEX IF NOT EXISTS idx_cities_country_id ON cities(country_id)",
    "CREATE INDEX IF NOT EXISTS idx_subscriptions_client_id ON subscriptions(client_id)",
    "CREATE INDEX IF NOT EXISTS idx_my_masters_client_id ON my_masters(client_id)",
    "CREATE INDEX IF NOT EXISTS idx_user_preferences_user_id ON user_preferences(user_id)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for (table, statement) in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
        info!("Table {} ready", table);
    }

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
