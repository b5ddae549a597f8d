//! Construcción de consultas de listado
//!
//! Cada listado une la entidad con su último estado mediante un CTE con
//! `ROW_NUMBER() OVER (PARTITION BY ...)` y filtra sobre esa columna unida.
//! El total se obtiene con un `COUNT(*)` aparte bajo el mismo predicado.

use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::dto::pagination::{Pagination, SortDirection};
use crate::models::booking::PaymentMethod;
use crate::models::status::{BookingStatus, VehicleStatus};
use crate::models::vehicle::{FuelType, Transmission, VehicleType};

/// Columnas ordenables de vehículos (clave pública -> expresión SQL)
pub const VEHICLE_SORT_COLUMNS: &[(&str, &str)] = &[
    ("createdAt", "v.created_at"),
    ("brand", "v.brand"),
    ("model", "v.model"),
    ("year", "v.year"),
    ("licensePlate", "v.license_plate"),
    ("odometer", "v.odometer"),
    ("status", "ls.status"),
];

/// Columnas ordenables de reservas
pub const BOOKING_SORT_COLUMNS: &[(&str, &str)] = &[
    ("createdAt", "b.created_at"),
    ("startDate", "b.start_date"),
    ("endDate", "b.end_date"),
    ("totalAmount", "b.total_amount"),
    ("customerName", "b.customer_name"),
    ("status", "ls.status"),
];

/// Columnas ordenables de clientes
pub const CUSTOMER_SORT_COLUMNS: &[(&str, &str)] = &[
    ("createdAt", "c.created_at"),
    ("fullName", "c.full_name"),
    ("totalRentals", "c.total_rentals"),
    ("lastRentalDate", "c.last_rental_date"),
];

/// Orden resuelto contra una lista blanca
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// Resolver `sortBy`/`sortDir`. Una clave desconocida vuelve al orden por
/// defecto: primera columna (creación) descendente.
pub fn resolve_sort(
    allowed: &'static [(&'static str, &'static str)],
    sort_by: Option<&str>,
    sort_dir: Option<&str>,
) -> SortSpec {
    let requested = sort_by.map(str::trim).unwrap_or_default();

    match allowed.iter().find(|(key, _)| *key == requested) {
        Some((_, column)) => SortSpec {
            column,
            direction: SortDirection::from_raw(sort_dir),
        },
        None => SortSpec {
            column: allowed[0].1,
            direction: SortDirection::Desc,
        },
    }
}

/// Filtros del listado de vehículos (combinados con AND)
#[derive(Debug, Clone, Default)]
pub struct VehicleFilters {
    pub search: Option<String>,
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
}

/// Filtros del listado de reservas (combinados con AND)
#[derive(Debug, Clone, Default)]
pub struct BookingFilters {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub payment_method: Option<PaymentMethod>,
    /// `start_date >= start_from`
    pub start_from: Option<DateTime<Utc>>,
    /// `end_date < end_before` (límite exclusivo)
    pub end_before: Option<DateTime<Utc>>,
}

/// CTE con la fila más reciente del historial por entidad
pub fn latest_status_cte(history_table: &str, entity_column: &str) -> String {
    format!(
        "WITH latest_status AS ( \
            SELECT {col}, status, changed_at FROM ( \
                SELECT {col}, status, changed_at, \
                       ROW_NUMBER() OVER (PARTITION BY {col} ORDER BY changed_at DESC, seq DESC) AS rn \
                FROM {table} \
            ) ranked WHERE rn = 1 \
        ) ",
        col = entity_column,
        table = history_table,
    )
}

/// Patrón ILIKE con comodines escapados; `None` si la búsqueda está vacía
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|t| !t.is_empty())?;
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}

fn push_search(qb: &mut QueryBuilder<'static, Postgres>, columns: &[&str], pattern: String) {
    qb.push(" AND (");
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
    }
    qb.push(")");
}

fn push_page(
    qb: &mut QueryBuilder<'static, Postgres>,
    sort: SortSpec,
    tiebreaker: &str,
    pagination: Pagination,
) {
    qb.push(" ORDER BY ")
        .push(sort.column)
        .push(" ")
        .push(sort.direction.as_sql())
        .push(", ")
        .push(tiebreaker)
        .push(" ASC");
    qb.push(" LIMIT ").push_bind(pagination.page_size);
    qb.push(" OFFSET ").push_bind(pagination.offset());
}

// ---------------------------------------------------------------- vehículos

const VEHICLE_FROM: &str =
    " FROM vehicles v LEFT JOIN latest_status ls ON ls.vehicle_id = v.id WHERE 1=1";

fn push_vehicle_filters(qb: &mut QueryBuilder<'static, Postgres>, filters: &VehicleFilters) {
    if let Some(pattern) = search_pattern(filters.search.as_deref()) {
        push_search(
            qb,
            &["v.brand", "v.model", "v.license_plate", "v.vin"],
            pattern,
        );
    }
    if let Some(status) = filters.status {
        qb.push(" AND ls.status = ").push_bind(status);
    }
    if let Some(vehicle_type) = filters.vehicle_type {
        qb.push(" AND v.vehicle_type = ").push_bind(vehicle_type);
    }
    if let Some(fuel_type) = filters.fuel_type {
        qb.push(" AND v.fuel_type = ").push_bind(fuel_type);
    }
    if let Some(transmission) = filters.transmission {
        qb.push(" AND v.transmission = ").push_bind(transmission);
    }
}

/// Página de vehículos con su último estado
pub fn vehicle_list_query(
    filters: &VehicleFilters,
    sort: SortSpec,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(latest_status_cte("vehicle_status_history", "vehicle_id"));
    qb.push("SELECT v.*, ls.status AS current_status, ls.changed_at AS status_changed_at");
    qb.push(VEHICLE_FROM);
    push_vehicle_filters(&mut qb, filters);
    push_page(&mut qb, sort, "v.id", pagination);
    qb
}

/// Total de vehículos bajo los mismos filtros
pub fn vehicle_count_query(filters: &VehicleFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(latest_status_cte("vehicle_status_history", "vehicle_id"));
    qb.push("SELECT COUNT(*)");
    qb.push(VEHICLE_FROM);
    push_vehicle_filters(&mut qb, filters);
    qb
}

// ---------------------------------------------------------------- reservas

const BOOKING_FROM: &str = " FROM bookings b \
    JOIN vehicles v ON v.id = b.vehicle_id \
    LEFT JOIN latest_status ls ON ls.booking_id = b.id WHERE 1=1";

fn push_booking_filters(qb: &mut QueryBuilder<'static, Postgres>, filters: &BookingFilters) {
    if let Some(pattern) = search_pattern(filters.search.as_deref()) {
        push_search(
            qb,
            &[
                "b.customer_name",
                "b.customer_email",
                "b.customer_phone",
                "v.brand",
                "v.model",
                "v.license_plate",
            ],
            pattern,
        );
    }
    if let Some(status) = filters.status {
        qb.push(" AND ls.status = ").push_bind(status);
    }
    if let Some(payment_method) = filters.payment_method {
        qb.push(" AND b.payment_method = ").push_bind(payment_method);
    }
    if let Some(start_from) = filters.start_from {
        qb.push(" AND b.start_date >= ").push_bind(start_from);
    }
    if let Some(end_before) = filters.end_before {
        qb.push(" AND b.end_date < ").push_bind(end_before);
    }
}

/// Página de reservas con vehículo y último estado
pub fn booking_list_query(
    filters: &BookingFilters,
    sort: SortSpec,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(latest_status_cte("booking_status_history", "booking_id"));
    qb.push(
        "SELECT b.*, v.brand AS vehicle_brand, v.model AS vehicle_model, \
         v.license_plate AS vehicle_license_plate, \
         ls.status AS current_status, ls.changed_at AS status_changed_at",
    );
    qb.push(BOOKING_FROM);
    push_booking_filters(&mut qb, filters);
    push_page(&mut qb, sort, "b.id", pagination);
    qb
}

/// Total de reservas bajo los mismos filtros
pub fn booking_count_query(filters: &BookingFilters) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(latest_status_cte("booking_status_history", "booking_id"));
    qb.push("SELECT COUNT(*)");
    qb.push(BOOKING_FROM);
    push_booking_filters(&mut qb, filters);
    qb
}

// ---------------------------------------------------------------- clientes

const CUSTOMER_SEARCH_COLUMNS: &[&str] =
    &["c.full_name", "c.email", "c.phone", "c.license_number"];

/// Página de clientes
pub fn customer_list_query(
    search: Option<&str>,
    sort: SortSpec,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT c.* FROM customers c WHERE 1=1");
    if let Some(pattern) = search_pattern(search) {
        push_search(&mut qb, CUSTOMER_SEARCH_COLUMNS, pattern);
    }
    push_page(&mut qb, sort, "c.id", pagination);
    qb
}

pub fn customer_count_query(search: Option<&str>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM customers c WHERE 1=1");
    if let Some(pattern) = search_pattern(search) {
        push_search(&mut qb, CUSTOMER_SEARCH_COLUMNS, pattern);
    }
    qb
}

/// Sugerencias para el asistente: coincidencia por cualquier dato de contacto
pub fn customer_suggestion_query(term: &str, limit: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT c.* FROM customers c WHERE 1=1");
    if let Some(pattern) = search_pattern(Some(term)) {
        push_search(&mut qb, CUSTOMER_SEARCH_COLUMNS, pattern);
    }
    qb.push(" ORDER BY c.last_rental_date DESC NULLS LAST, c.full_name ASC LIMIT ")
        .push_bind(limit);
    qb
}

// ---------------------------------------------------------------- usuarios

const USER_SEARCH_COLUMNS: &[&str] = &["u.email", "u.full_name"];

pub fn user_list_query(
    search: Option<&str>,
    pagination: Pagination,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT u.* FROM users u WHERE 1=1");
    if let Some(pattern) = search_pattern(search) {
        push_search(&mut qb, USER_SEARCH_COLUMNS, pattern);
    }
    let sort = SortSpec {
        column: "u.created_at",
        direction: SortDirection::Desc,
    };
    push_page(&mut qb, sort, "u.id", pagination);
    qb
}

pub fn user_count_query(search: Option<&str>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users u WHERE 1=1");
    if let Some(pattern) = search_pattern(search) {
        push_search(&mut qb, USER_SEARCH_COLUMNS, pattern);
    }
    qb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_sort_allow_list() {
        let sort = resolve_sort(VEHICLE_SORT_COLUMNS, Some("brand"), Some("asc"));
        assert_eq!(sort.column, "v.brand");
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_resolve_sort_unknown_key_falls_back_to_created_desc() {
        let sort = resolve_sort(
            VEHICLE_SORT_COLUMNS,
            Some("vin; DROP TABLE vehicles"),
            Some("asc"),
        );
        assert_eq!(sort.column, "v.created_at");
        assert_eq!(sort.direction, SortDirection::Desc);

        let sort = resolve_sort(BOOKING_SORT_COLUMNS, None, None);
        assert_eq!(sort.column, "b.created_at");
        assert_eq!(sort.direction, SortDirection::Desc);
    }

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(Some("  ")), None);
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("Toy")).as_deref(), Some("%Toy%"));
        assert_eq!(search_pattern(Some("50%_off")).as_deref(), Some("%50\\%\\_off%"));
    }

    #[test]
    fn test_latest_status_cte_ranks_by_timestamp() {
        let cte = latest_status_cte("vehicle_status_history", "vehicle_id");
        assert!(cte.contains(
            "ROW_NUMBER() OVER (PARTITION BY vehicle_id ORDER BY changed_at DESC, seq DESC)"
        ));
        assert!(cte.contains("WHERE rn = 1"));
    }

    #[test]
    fn test_vehicle_list_query_without_filters() {
        let sort = resolve_sort(VEHICLE_SORT_COLUMNS, None, None);
        let qb = vehicle_list_query(&VehicleFilters::default(), sort, Pagination::default());
        let sql = qb.sql();

        assert!(sql.contains("LEFT JOIN latest_status ls ON ls.vehicle_id = v.id"));
        assert!(!sql.contains("ILIKE"));
        assert!(sql.contains("ORDER BY v.created_at DESC, v.id ASC LIMIT $1 OFFSET $2"));
    }

    #[test]
    fn test_vehicle_filters_are_conjunctive_and_search_disjunctive() {
        let filters = VehicleFilters {
            search: Some("corolla".to_string()),
            status: Some(VehicleStatus::Maintenance),
            fuel_type: Some(FuelType::Diesel),
            ..Default::default()
        };
        let sort = resolve_sort(VEHICLE_SORT_COLUMNS, Some("year"), Some("asc"));
        let qb = vehicle_list_query(&filters, sort, Pagination::default());
        let sql = qb.sql();

        assert!(sql.contains(
            "AND (v.brand ILIKE $1 OR v.model ILIKE $2 OR v.license_plate ILIKE $3 OR v.vin ILIKE $4)"
        ));
        assert!(sql.contains("AND ls.status = $5"));
        assert!(sql.contains("AND v.fuel_type = $6"));
        assert!(sql.contains("ORDER BY v.year ASC, v.id ASC LIMIT $7 OFFSET $8"));
    }

    #[test]
    fn test_vehicle_count_query_shares_predicate() {
        let filters = VehicleFilters {
            status: Some(VehicleStatus::Available),
            ..Default::default()
        };
        let qb = vehicle_count_query(&filters);
        let sql = qb.sql();

        assert!(sql.contains("SELECT COUNT(*) FROM vehicles v LEFT JOIN latest_status ls"));
        assert!(sql.contains("AND ls.status = $1"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn test_booking_list_query_status_filter_on_joined_column() {
        let filters = BookingFilters {
            status: Some(BookingStatus::Active),
            ..Default::default()
        };
        let sort = resolve_sort(BOOKING_SORT_COLUMNS, Some("startDate"), None);
        let qb = booking_list_query(&filters, sort, Pagination::default());
        let sql = qb.sql();

        assert!(sql.contains("PARTITION BY booking_id"));
        assert!(sql.contains("JOIN vehicles v ON v.id = b.vehicle_id"));
        assert!(sql.contains("AND ls.status = $1"));
        assert!(sql.contains("ORDER BY b.start_date DESC, b.id ASC"));
    }

    #[test]
    fn test_booking_search_covers_customer_and_vehicle() {
        let now = Utc::now();
        let filters = BookingFilters {
            search: Some("ana".to_string()),
            start_from: Some(now),
            end_before: Some(now),
            ..Default::default()
        };
        let qb = booking_count_query(&filters);
        let sql = qb.sql();

        let columns = [
            "b.customer_name",
            "b.customer_email",
            "b.customer_phone",
            "v.brand",
            "v.model",
            "v.license_plate",
        ];
        for column in columns {
            assert!(sql.contains(&format!("{} ILIKE", column)), "missing {}", column);
        }
        assert!(sql.contains("AND b.start_date >= $7"));
        assert!(sql.contains("AND b.end_date < $8"));
    }

    #[test]
    fn test_customer_suggestion_query() {
        let qb = customer_suggestion_query("600", 10);
        let sql = qb.sql();
        assert!(sql.contains("c.license_number ILIKE $4"));
        assert!(sql.ends_with("LIMIT $5"));
    }
}
