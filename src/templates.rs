use crate::blog::Post;
use crate::error::Result;
use crate::flash::Flash;
use askama::Template;
use axum::response::Html;

/// What every page's layout needs: heading, highlighted nav entry, pending flash.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub title: &'static str,
    pub active: &'static str,
    pub flash: Option<Flash>,
    pub signed_in: bool,
}

impl PageContext {
    pub fn new(title: &'static str, active: &'static str) -> PageContext {
        PageContext {
            title,
            active,
            flash: None,
            signed_in: false,
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> PageContext {
        self.flash = flash;
        self
    }

    pub fn signed_in(mut self, signed_in: bool) -> PageContext {
        self.signed_in = signed_in;
        self
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "posts/index.html")]
pub struct PostsPage {
    pub page: PageContext,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "posts/create-post.html")]
pub struct CreatePostPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "posts/edit-post.html")]
pub struct EditPostPage {
    pub page: PageContext,
}

#[derive(Template)]
#[template(path = "posts/view-post.html")]
pub struct ViewPostPage {
    pub page: PageContext,
}

pub fn render(template: &impl Template) -> Result<Html<String>> {
    Ok(Html(template.render()?))
}
