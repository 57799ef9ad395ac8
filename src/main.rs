#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use leptos::logging::log;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use pavilion_reviews::app::*;
    use pavilion_reviews::config::StoreConfig;
    use pavilion_reviews::{api, store};
    use std::io;

    // Pick up a local .env before reading the store settings
    dotenvy::dotenv().ok();

    // Pick and open the table store
    let store_config = StoreConfig::from_env().map_err(io::Error::other)?;
    let store = store::connect(&store_config).await.map_err(io::Error::other)?;

    // Load configuration
    let conf = get_configuration(None).await.map_err(io::Error::other)?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);
    log!("[SERVER] listening on http://{}", &addr);

    // Start the Actix Web server
    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            // Pass the store as shared state
            .app_data(web::Data::new(store.clone()))
            // Register the JSON API BEFORE the Leptos routes
            .configure(api::configure)
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            // Pass Leptos options to the app
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use pavilion_reviews::app::*;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
