use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::customer_dto::CreateCustomerRequest;
use crate::dto::pagination::Pagination;
use crate::models::customer::{ContactIdentity, Customer};
use crate::services::listing::{
    customer_count_query, customer_list_query, customer_suggestion_query, SortSpec,
};
use crate::utils::errors::AppResult;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Buscar un cliente por licencia, email o teléfono
    ///
    /// Orden de preferencia: licencia, email, teléfono y, a igualdad, el más antiguo.
    pub async fn find_matching(
        conn: &mut PgConnection,
        identity: &ContactIdentity<'_>,
    ) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE lower(license_number) = lower($1)
               OR lower(email) = lower($2)
               OR phone = $3
            ORDER BY
                CASE
                    WHEN lower(license_number) = lower($1) THEN 0
                    WHEN lower(email) = lower($2) THEN 1
                    ELSE 2
                END,
                created_at ASC,
                id ASC
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(identity.license_number)
        .bind(identity.email)
        .bind(identity.phone)
        .fetch_optional(conn)
        .await?;

        Ok(customer)
    }

    /// Registrar un alquiler más para un cliente existente
    pub async fn register_rental(
        conn: &mut PgConnection,
        customer_id: Uuid,
        rental_date: DateTime<Utc>,
    ) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET total_rentals = total_rentals + 1,
                last_rental_date = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(rental_date)
        .fetch_one(conn)
        .await?;

        Ok(customer)
    }

    /// Insertar un cliente en la conexión dada
    pub async fn insert(
        conn: &mut PgConnection,
        full_name: &str,
        identity: &ContactIdentity<'_>,
        address: Option<&str>,
        total_rentals: i32,
        last_rental_date: Option<DateTime<Utc>>,
    ) -> AppResult<Customer> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (id, full_name, email, phone, license_number, address, total_rentals, last_rental_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(full_name)
        .bind(identity.email)
        .bind(identity.phone)
        .bind(identity.license_number)
        .bind(address)
        .bind(total_rentals)
        .bind(last_rental_date)
        .fetch_one(conn)
        .await?;

        Ok(customer)
    }

    /// Alta manual desde el panel (sin alquileres)
    pub async fn create(&self, request: &CreateCustomerRequest) -> AppResult<Customer> {
        let identity = ContactIdentity {
            email: request.email.trim(),
            phone: request.phone.trim(),
            license_number: request.license_number.trim(),
        };

        let mut conn = self.pool.acquire().await?;
        Self::insert(
            &mut conn,
            request.full_name.trim(),
            &identity,
            request.address.as_deref(),
            0,
            None,
        )
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn list(
        &self,
        search: Option<&str>,
        sort: SortSpec,
        pagination: Pagination,
    ) -> AppResult<(Vec<Customer>, i64)> {
        let mut list_query = customer_list_query(search, sort, pagination);
        let customers = list_query
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        let mut count_query = customer_count_query(search);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok((customers, total))
    }

    pub async fn suggest(&self, term: &str, limit: i64) -> AppResult<Vec<Customer>> {
        let mut query = customer_suggestion_query(term, limit);
        let customers = query
            .build_query_as::<Customer>()
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }
}
