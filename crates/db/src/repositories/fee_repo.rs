//! Repository for the `fees` table.
//!
//! Payments are applied inside a transaction with the fee row locked, so two
//! concurrent payments against the same fee cannot both pass the
//! no-overpayment check. Status is derived from the amounts by
//! [`registrar_core::fee::derive_payment_status`]; the generic `update` is
//! deliberately permissive and applies whatever the caller sends.

use registrar_core::fee::{self, PAYMENT_STATUS_PAID, PAYMENT_STATUS_PENDING};
use registrar_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::fee::{CreateFee, Fee, UpdateFee};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, semester, fee_type, amount, paid_amount, \
    due_date, payment_date, payment_status, payment_method, transaction_id, \
    created_at, updated_at";

/// Outcome of a payment attempt against a fee.
#[derive(Debug)]
pub enum PaymentOutcome {
    Applied(Fee),
    /// The fee row does not exist.
    FeeMissing,
    /// paid_amount + payment would exceed the fee amount.
    ExceedsBalance,
    /// Full settlement requested but nothing is outstanding.
    AlreadyPaid,
}

/// Provides CRUD, payment and aggregate operations for fees.
pub struct FeeRepo;

impl FeeRepo {
    /// Insert a new fee, returning the created row.
    ///
    /// If `paid_amount` is `None`, defaults to 0.
    /// If `payment_status` is `None`, defaults to `'Pending'`.
    pub async fn create(pool: &PgPool, input: &CreateFee) -> Result<Fee, sqlx::Error> {
        let query = format!(
            "INSERT INTO fees
                (student_id, semester, fee_type, amount, paid_amount, due_date,
                 payment_date, payment_status, payment_method, transaction_id)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6, $7,
                     COALESCE($8, 'Pending'), $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(input.student_id)
            .bind(&input.semester)
            .bind(&input.fee_type)
            .bind(input.amount)
            .bind(input.paid_amount)
            .bind(input.due_date)
            .bind(input.payment_date)
            .bind(&input.payment_status)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// Find a fee by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE id = $1");
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all fees.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees ORDER BY id");
        sqlx::query_as::<_, Fee>(&query).fetch_all(pool).await
    }

    /// List a student's fees.
    pub async fn list_by_student(pool: &PgPool, student_id: DbId) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE student_id = $1 ORDER BY id");
        sqlx::query_as::<_, Fee>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// List fees for a semester.
    pub async fn list_by_semester(pool: &PgPool, semester: &str) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE semester = $1 ORDER BY id");
        sqlx::query_as::<_, Fee>(&query)
            .bind(semester)
            .fetch_all(pool)
            .await
    }

    /// List a student's fees for a semester.
    pub async fn list_by_student_and_semester(
        pool: &PgPool,
        student_id: DbId,
        semester: &str,
    ) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees WHERE student_id = $1 AND semester = $2 ORDER BY id"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(student_id)
            .bind(semester)
            .fetch_all(pool)
            .await
    }

    /// List fees with the given payment status.
    pub async fn list_by_status(pool: &PgPool, status: &str) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fees WHERE payment_status = $1 ORDER BY id");
        sqlx::query_as::<_, Fee>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List fees past their due date that still have an outstanding balance.
    pub async fn list_overdue(pool: &PgPool) -> Result<Vec<Fee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fees
             WHERE due_date < CURRENT_DATE AND payment_status = ANY($1)
             ORDER BY due_date"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(fee::OPEN_PAYMENT_STATUSES)
            .fetch_all(pool)
            .await
    }

    /// Sum of all fee amounts charged to a student.
    pub async fn total_amount_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM fees WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(pool)
            .await
    }

    /// Sum of everything a student has paid.
    pub async fn total_paid_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(paid_amount), 0) FROM fees WHERE student_id = $1")
            .bind(student_id)
            .fetch_one(pool)
            .await
    }

    /// Outstanding balance across the student's open (Pending/Partial) fees.
    pub async fn outstanding_balance_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount - paid_amount), 0) FROM fees
             WHERE student_id = $1 AND payment_status = ANY($2)",
        )
        .bind(student_id)
        .bind(fee::OPEN_PAYMENT_STATUSES)
        .fetch_one(pool)
        .await
    }

    /// Count a student's pending fees.
    pub async fn count_pending_by_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM fees WHERE student_id = $1 AND payment_status = $2",
        )
        .bind(student_id)
        .bind(PAYMENT_STATUS_PENDING)
        .fetch_one(pool)
        .await
    }

    /// Apply a partial or full payment to a fee.
    ///
    /// Locks the fee row, rejects payments that would exceed the amount, and
    /// derives the resulting status. The payment method replaces the stored
    /// one only when given; the transaction id is always overwritten.
    pub async fn apply_payment(
        pool: &PgPool,
        id: DbId,
        amount: Decimal,
        payment_method: Option<&str>,
        transaction_id: Option<&str>,
    ) -> Result<PaymentOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: Option<(Decimal, Decimal)> =
            sqlx::query_as("SELECT amount, paid_amount FROM fees WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((fee_amount, paid_amount)) = row else {
            return Ok(PaymentOutcome::FeeMissing);
        };

        let new_paid = paid_amount + amount;
        if new_paid > fee_amount {
            return Ok(PaymentOutcome::ExceedsBalance);
        }

        let status = fee::derive_payment_status(fee_amount, new_paid);
        let query = format!(
            "UPDATE fees SET
                paid_amount = $2,
                payment_status = $3,
                payment_date = CURRENT_DATE,
                payment_method = COALESCE($4, payment_method),
                transaction_id = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let fee = sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(new_paid)
            .bind(status)
            .bind(payment_method)
            .bind(transaction_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PaymentOutcome::Applied(fee))
    }

    /// Settle a fee's full outstanding balance in one payment.
    pub async fn settle_in_full(
        pool: &PgPool,
        id: DbId,
        payment_method: Option<&str>,
        transaction_id: Option<&str>,
    ) -> Result<PaymentOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let row: Option<(Decimal, Decimal)> =
            sqlx::query_as("SELECT amount, paid_amount FROM fees WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((fee_amount, paid_amount)) = row else {
            return Ok(PaymentOutcome::FeeMissing);
        };

        if fee::outstanding_balance(fee_amount, paid_amount) <= Decimal::ZERO {
            return Ok(PaymentOutcome::AlreadyPaid);
        }

        let query = format!(
            "UPDATE fees SET
                paid_amount = amount,
                payment_status = $2,
                payment_date = CURRENT_DATE,
                payment_method = COALESCE($3, payment_method),
                transaction_id = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let fee = sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(PAYMENT_STATUS_PAID)
            .bind(payment_method)
            .bind(transaction_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PaymentOutcome::Applied(fee))
    }

    /// Update a fee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. This is the
    /// permissive path: it does not re-derive `payment_status`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFee,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET
                semester = COALESCE($2, semester),
                fee_type = COALESCE($3, fee_type),
                amount = COALESCE($4, amount),
                paid_amount = COALESCE($5, paid_amount),
                due_date = COALESCE($6, due_date),
                payment_date = COALESCE($7, payment_date),
                payment_status = COALESCE($8, payment_status),
                payment_method = COALESCE($9, payment_method),
                transaction_id = COALESCE($10, transaction_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(&input.semester)
            .bind(&input.fee_type)
            .bind(input.amount)
            .bind(input.paid_amount)
            .bind(input.due_date)
            .bind(input.payment_date)
            .bind(&input.payment_status)
            .bind(&input.payment_method)
            .bind(&input.transaction_id)
            .fetch_optional(pool)
            .await
    }

    /// Set only the payment status. Returns `None` if the fee is missing.
    pub async fn update_payment_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Fee>, sqlx::Error> {
        let query = format!(
            "UPDATE fees SET payment_status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fee>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fee by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all of a student's fees, returning how many were removed.
    pub async fn delete_by_student(pool: &PgPool, student_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fees WHERE student_id = $1")
            .bind(student_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
