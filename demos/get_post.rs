use imgchest::client::Client;

#[tokio::main]
async fn main() -> imgchest::error::Result<()> {
    let token = std::env::var("IMGCHEST_TOKEN").unwrap_or_default();
    let client = Client::new()?.with_token(token);

    let post = client.get_post("3qe4gdvj4j2").await?;

    println!("{} by {} ({} views)", post.title, post.username, post.views);
    for file in &post.files {
        match &file.description {
            Some(description) => println!("- {} {}", file.link, description),
            None => println!("- {}", file.link),
        }
    }

    Ok(())
}
