use crate::{config, info, warning};

pub async fn auth() {
    let url = format!("{}/authorise", config::home_url());

    info!("Opening {} to authorise the relay with Spotify", url);
    if webbrowser::open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}
