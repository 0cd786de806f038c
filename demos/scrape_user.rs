use imgchest::client::Client;
use imgchest::error::Error;

#[tokio::main]
async fn main() -> imgchest::error::Result<()> {
    let name = std::env::args().nth(1).unwrap_or_else(|| String::from("LunarLandr"));
    let client = Client::new()?;

    match client.get_scraped_user(&name).await {
        Ok(user) => {
            println!("{} joined on {}", user.name, user.created);
            println!("Posts: {}", user.posts);
            println!("Comments: {}", user.comments);
            if let Some(views) = user.post_views {
                println!("Post views: {}", views);
            }
            if let Some(favorites) = user.favorites {
                println!("Favorites: {}", favorites);
            }
        }
        Err(Error::InvalidScrapedUser(e)) if !e.is_markup_drift() => {
            println!("{} doesn't exist", name);
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
