use sea_orm::*;

use crate::domain::DomainError;
use crate::infrastructure::auth::hash_password;
use crate::infrastructure::config::StaffBootstrap;
use crate::models::{book, payment, shipping, staff};

const DEMO_BOOKS: &[(&str, &str, f64, i32)] = &[
    ("The Great Gatsby", "F. Scott Fitzgerald", 15.99, 50),
    ("To Kill a Mockingbird", "Harper Lee", 12.99, 40),
    ("1984", "George Orwell", 14.99, 60),
    ("Pride and Prejudice", "Jane Austen", 11.99, 30),
    ("The Catcher in the Rye", "J.D. Salinger", 13.99, 45),
    ("Harry Potter and the Sorcerer's Stone", "J.K. Rowling", 16.99, 70),
    ("The Lord of the Rings", "J.R.R. Tolkien", 25.99, 25),
    ("The Hobbit", "J.R.R. Tolkien", 18.99, 35),
    ("Dune", "Frank Herbert", 19.99, 40),
    ("Neuromancer", "William Gibson", 17.99, 20),
];

const DEMO_SHIPPING: &[(&str, f64)] = &[("Standard", 5.0), ("Express", 15.0), ("Overnight", 25.0)];

const DEMO_PAYMENTS: &[&str] = &["Credit Card", "PayPal", "Debit Card"];

/// Insert the demo catalog and checkout options. Does nothing when books already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if book::Entity::find().count(db).await? > 0 {
        tracing::debug!("Catalog already populated, skipping demo seed");
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    for (title, author, price, stock) in DEMO_BOOKS {
        book::ActiveModel {
            title: Set((*title).to_owned()),
            author: Set((*author).to_owned()),
            price: Set(*price),
            stock: Set(*stock),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    if shipping::Entity::find().count(db).await? == 0 {
        for (name, fee) in DEMO_SHIPPING {
            shipping::ActiveModel {
                method_name: Set((*name).to_owned()),
                fee: Set(*fee),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    if payment::Entity::find().count(db).await? == 0 {
        for name in DEMO_PAYMENTS {
            payment::ActiveModel {
                method_name: Set((*name).to_owned()),
                status: Set(payment::STATUS_ACTIVE.to_owned()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }

    tracing::info!(
        "🌱 Seeded {} books, {} shipping methods, {} payment methods",
        DEMO_BOOKS.len(),
        DEMO_SHIPPING.len(),
        DEMO_PAYMENTS.len()
    );
    Ok(())
}

/// Create the configured staff account unless its email is already taken.
pub async fn bootstrap_staff(
    db: &DatabaseConnection,
    account: &StaffBootstrap,
) -> Result<(), DomainError> {
    let email = account.email.trim().to_lowercase();

    let existing = staff::Entity::find()
        .filter(staff::Column::Email.eq(email.as_str()))
        .count(db)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let password_hash = hash_password(&account.password).map_err(DomainError::Internal)?;

    staff::ActiveModel {
        name: Set(account.name.clone()),
        role: Set("Manager".to_owned()),
        email: Set(email.clone()),
        password_hash: Set(password_hash),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!("👤 Created staff account {}", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::db::init_db;

    #[tokio::test]
    async fn demo_seed_runs_once() {
        let db = init_db("sqlite::memory:").await.unwrap();

        seed_demo_data(&db).await.unwrap();
        seed_demo_data(&db).await.unwrap();

        assert_eq!(book::Entity::find().count(&db).await.unwrap(), 10);
        assert_eq!(shipping::Entity::find().count(&db).await.unwrap(), 3);
        assert_eq!(payment::Entity::find().count(&db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn staff_bootstrap_is_idempotent() {
        let db = init_db("sqlite::memory:").await.unwrap();
        let account = StaffBootstrap {
            name: "Manager John".to_string(),
            email: "John@Shop.test".to_string(),
            password: "manager1".to_string(),
        };

        bootstrap_staff(&db, &account).await.unwrap();
        bootstrap_staff(&db, &account).await.unwrap();

        let rows = staff::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "john@shop.test");
    }
}
