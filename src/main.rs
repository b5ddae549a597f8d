use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use fleet_rental::config::EnvironmentConfig;
use fleet_rental::create_router;
use fleet_rental::database::DatabaseConnection;
use fleet_rental::services::auth_service::AuthService;
use fleet_rental::utils::jwt::JwtConfig;
use fleet_rental::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚗 Fleet Rental API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    let pool = db_connection.pool().clone();

    // Administrador inicial
    let auth_service = AuthService::new(pool.clone(), JwtConfig::from(&config));
    match auth_service.bootstrap_admin(&config).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("👤 Sin bootstrap de administrador (usuarios existentes o sin credenciales)")
        }
        Err(e) => warn!("⚠️ No se pudo crear el administrador inicial: {}", e),
    }

    if config.is_development() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS permisivo: CORS_ORIGINS no configurado");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_router(AppState::new(pool, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Liveness");
    info!("   POST /auth/login - Iniciar sesión");
    info!("   GET  /auth/me - Usuario actual");
    info!("🚗 Vehículos:");
    info!("   GET  /vehicles - Listado paginado");
    info!("   POST /vehicles - Alta (admin)");
    info!("   GET  /vehicles/:id - Ficha con historial y media");
    info!("   PATCH /vehicles/:id - Editar (admin)");
    info!("   PATCH /vehicles/:id/status - Nuevo estado");
    info!("   GET|POST /vehicles/:id/media - Media del vehículo");
    info!("📝 Reservas:");
    info!("   GET  /bookings - Listado paginado");
    info!("   POST /bookings - Crear reserva");
    info!("   GET  /bookings/:id - Detalle con historial e inspecciones");
    info!("   PATCH /bookings/:id/status - Nuevo estado");
    info!("   GET|POST /bookings/customers - Clientes");
    info!("🔍 Inspecciones:");
    info!("   POST /inspections - Registrar inspección");
    info!("   GET  /inspections/:id - Obtener inspección");
    info!("👥 Usuarios (admin):");
    info!("   GET|POST /users, PATCH /users/:id");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
