use study_planner_api::Application;
use study_planner_infra::PlannerContext;

pub struct TestApp {
    /// Base address of the api, e.g. http://localhost:3000/api/v1
    pub address: String,
    pub ctx: PlannerContext,
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = PlannerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.user_id = Some("test-user".into());

    let shared_ctx = ctx.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        ctx: shared_ctx,
    }
}
