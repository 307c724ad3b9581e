//! Seed the database with sample content for local development.
//!
//! Inserts a published post, a draft, two case studies, and a handful of
//! goals. Duplicate slugs from a previous run are skipped, so re-seeding
//! is harmless.

use atelier_core::{PostStatus, Progress, Slug, Visibility};
use atelier_site::db::{
    GoalRepository, PostRepository, RepositoryError, WorkRepository, migrations,
};
use atelier_site::models::{NewGoal, NewPost, NewWork};

use super::connect;

/// Insert the sample content.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is unset or a write fails for a
/// reason other than a duplicate slug.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;

    // Make sure the schema exists before writing into it
    migrations::run(&pool).await?;

    let posts = PostRepository::new(&pool);
    for new in sample_posts()? {
        let slug = new.slug.clone();
        match posts.create(new).await {
            Ok(post) => tracing::info!(id = %post.id, slug = %post.slug, "seeded post"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(%slug, "post already seeded, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let works = WorkRepository::new(&pool);
    for new in sample_works()? {
        let slug = new.slug.clone();
        match works.create(new).await {
            Ok(work) => tracing::info!(id = %work.id, slug = %work.slug, "seeded case study"),
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!(%slug, "case study already seeded, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Goals have no uniqueness constraint; re-seeding duplicates them,
    // which is fine for a development database.
    let goals = GoalRepository::new(&pool);
    for new in sample_goals()? {
        let goal = goals.create(new).await?;
        tracing::info!(id = %goal.id, "seeded goal");
    }

    tracing::info!("Seeding complete");
    Ok(())
}

fn sample_posts() -> Result<Vec<NewPost>, Box<dyn std::error::Error>> {
    Ok(vec![
        NewPost {
            title: "Hello, world".to_string(),
            slug: Slug::parse("hello-world")?,
            content: "<p>First post on the new site.</p>".to_string(),
            image_url: None,
            status: PostStatus::Published,
        },
        NewPost {
            title: "Notes on async Rust".to_string(),
            slug: Slug::parse("notes-on-async-rust")?,
            content: "<p>Draft in progress.</p>".to_string(),
            image_url: None,
            status: PostStatus::Draft,
        },
    ])
}

fn sample_works() -> Result<Vec<NewWork>, Box<dyn std::error::Error>> {
    Ok(vec![
        NewWork {
            title: "This website".to_string(),
            slug: Slug::parse("this-website")?,
            tech_stack: vec!["Rust".to_string(), "Axum".to_string(), "Postgres".to_string()],
            description: "The site you are looking at.".to_string(),
            visibility: Visibility::Public,
            github_link: Some("https://github.com/maralindqvist/atelier".to_string()),
            live_link: None,
            image_url: None,
            video_url: None,
        },
        NewWork {
            title: "Internal tooling".to_string(),
            slug: Slug::parse("internal-tooling")?,
            tech_stack: vec!["Rust".to_string()],
            description: "Not ready to show yet.".to_string(),
            visibility: Visibility::Private,
            github_link: None,
            live_link: None,
            image_url: None,
            video_url: None,
        },
    ])
}

fn sample_goals() -> Result<Vec<NewGoal>, Box<dyn std::error::Error>> {
    Ok(vec![
        NewGoal {
            title: "Ship the portfolio redesign".to_string(),
            progress: Progress::COMPLETE,
            category: "projects".to_string(),
        },
        NewGoal {
            title: "Write one post a month".to_string(),
            progress: Progress::new(25)?,
            category: "writing".to_string(),
        },
        NewGoal {
            title: "Read twelve books".to_string(),
            progress: Progress::ZERO,
            category: "personal".to_string(),
        },
    ])
}
