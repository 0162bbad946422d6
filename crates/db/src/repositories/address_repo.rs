//! Repository for the `addresses` table.
//!
//! The primacy invariant (at most one primary address per student) is a
//! multi-row rule: any write that ends with `is_primary = true` first clears
//! the flag on the student's other addresses, inside the same transaction.
//! A partial unique index backstops the sweep at the store level.

use registrar_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::address::{Address, CreateAddress, UpdateAddress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, address_type, street_address, city, state, \
    postal_code, country, is_primary, created_at, updated_at";

/// Provides CRUD operations for student addresses.
pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address, returning the created row.
    ///
    /// If `country` is `None`, defaults to `'USA'`. If `is_primary` is
    /// `None`, defaults to `true`; when the new address is primary, the
    /// student's other primary addresses are demoted first.
    pub async fn create(pool: &PgPool, input: &CreateAddress) -> Result<Address, sqlx::Error> {
        let is_primary = input.is_primary.unwrap_or(true);

        let mut tx = pool.begin().await?;

        if is_primary {
            Self::clear_primary_inner(&mut tx, input.student_id, None).await?;
        }

        let query = format!(
            "INSERT INTO addresses
                (student_id, address_type, street_address, city, state,
                 postal_code, country, is_primary)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'USA'), $8)
             RETURNING {COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(input.student_id)
            .bind(&input.address_type)
            .bind(&input.street_address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(address)
    }

    /// Find an address by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all addresses.
    pub async fn list(pool: &PgPool) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses ORDER BY id");
        sqlx::query_as::<_, Address>(&query).fetch_all(pool).await
    }

    /// List a student's addresses.
    pub async fn list_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE student_id = $1 ORDER BY id");
        sqlx::query_as::<_, Address>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List a student's addresses of a given type.
    pub async fn list_by_student_and_type(
        pool: &PgPool,
        student_id: DbId,
        address_type: &str,
    ) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM addresses
             WHERE student_id = $1 AND address_type = $2
             ORDER BY id"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(student_id)
            .bind(address_type)
            .fetch_all(pool)
            .await
    }

    /// Find a student's primary address, if they have one.
    pub async fn find_primary(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE student_id = $1 AND is_primary");
        sqlx::query_as::<_, Address>(&query)
            .bind(student_id)
            .fetch_optional(pool)
            .await
    }

    /// List addresses in a city.
    pub async fn list_by_city(pool: &PgPool, city: &str) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE city = $1 ORDER BY id");
        sqlx::query_as::<_, Address>(&query)
            .bind(city)
            .fetch_all(pool)
            .await
    }

    /// List addresses in a state.
    pub async fn list_by_state(pool: &PgPool, state: &str) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE state = $1 ORDER BY id");
        sqlx::query_as::<_, Address>(&query)
            .bind(state)
            .fetch_all(pool)
            .await
    }

    /// Update an address. Only non-`None` fields in `input` are applied.
    ///
    /// When the update promotes the address to primary, the owning student's
    /// other primary addresses are demoted in the same transaction. Returns
    /// `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        student_id: DbId,
        input: &UpdateAddress,
    ) -> Result<Option<Address>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary == Some(true) {
            Self::clear_primary_inner(&mut tx, student_id, Some(id)).await?;
        }

        let query = format!(
            "UPDATE addresses SET
                address_type = COALESCE($2, address_type),
                street_address = COALESCE($3, street_address),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                postal_code = COALESCE($6, postal_code),
                country = COALESCE($7, country),
                is_primary = COALESCE($8, is_primary),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .bind(&input.address_type)
            .bind(&input.street_address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(address)
    }

    /// Promote an address to the student's primary one, demoting the rest.
    ///
    /// Ownership is checked by the handler before this call. Returns `None`
    /// if the address no longer exists.
    pub async fn set_primary(pool: &PgPool, id: DbId, student_id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        Self::clear_primary_inner(&mut tx, student_id, Some(id)).await?;

        let query = format!(
            "UPDATE addresses SET is_primary = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(address)
    }

    /// Delete an address by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a student's addresses, returning how many were removed.
    pub async fn delete_by_student(pool: &PgPool, student_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE student_id = $1")
            .bind(student_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Demote a student's primary addresses, optionally sparing one row.
    async fn clear_primary_inner(
        conn: &mut PgConnection,
        student_id: DbId,
        keep_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "UPDATE addresses SET is_primary = FALSE, updated_at = NOW()
             WHERE student_id = $1 AND is_primary AND ($2::bigint IS NULL OR id <> $2)",
        )
        .bind(student_id)
        .bind(keep_id)
        .execute(conn)
        .await?;
        if result.rows_affected() > 0 {
            tracing::debug!(student_id, demoted = result.rows_affected(), "Primary address sweep");
        }
        Ok(())
    }
}
