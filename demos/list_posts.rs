use futures::prelude::*;
use imgchest::client::Client;
use imgchest::list::{ListPostsBuilder, SortOrder};

#[tokio::main]
async fn main() -> imgchest::error::Result<()> {
    let client = Client::new()?;

    println!("The thirty newest posts!");

    let posts = client
        .list_posts_stream(ListPostsBuilder::new().sort(SortOrder::New))
        .take(30);
    futures::pin_mut!(posts);

    while let Some(post) = posts.next().await {
        match post {
            Ok(post) => println!("- {} with a score of {}", post.link, post.score),
            Err(e) => println!("- couldn't load post: {}", e),
        }
    }

    Ok(())
}
