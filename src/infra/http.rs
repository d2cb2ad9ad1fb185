use std::time::Duration;

use reqwest::{Client, ClientBuilder};

/// GitHub rejects API calls without a User-Agent.
pub fn user_agent() -> String {
    format!("standup/{}", env!("CARGO_PKG_VERSION"))
}

pub fn builder(timeout: Duration) -> ClientBuilder {
    Client::builder().user_agent(user_agent()).timeout(timeout)
}

/// Accepts connections and never answers, so requests can only end by timing out.
#[cfg(test)]
pub async fn unresponsive_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}
