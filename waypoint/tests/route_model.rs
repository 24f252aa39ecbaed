use std::collections::HashSet;
use std::sync::Arc;

use waypoint::{route_model, AnyRoute, Route, Router};

trait Auth: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

struct AlwaysIn;

impl Auth for AlwaysIn {
    fn is_authenticated(&self) -> bool {
        true
    }
}

struct NeverIn;

impl Auth for NeverIn {
    fn is_authenticated(&self) -> bool {
        false
    }
}

// The auth handle is neither comparable nor hashable.
struct HomeRoute {
    auth: Arc<dyn Auth>,
}

#[route_model]
impl Route for HomeRoute {
    type Id = &'static str;
    type Destination = &'static str;

    fn id(&self) -> &'static str {
        "home"
    }

    fn destination(&self) -> &'static str {
        if self.auth.is_authenticated() {
            "Home"
        } else {
            "Login"
        }
    }
}

struct ArticleRoute<T> {
    slug: String,
    payload: T,
}

#[route_model]
impl<T: Send + Sync + 'static> waypoint::Route for ArticleRoute<T> {
    type Id = String;
    type Destination = String;

    fn id(&self) -> String {
        self.slug.clone()
    }

    fn destination(&self) -> String {
        format!("Article {}", self.slug)
    }
}

fn home(auth: impl Auth + 'static) -> HomeRoute {
    HomeRoute {
        auth: Arc::new(auth),
    }
}

#[test]
fn test_route_model_compares_by_identity() {
    let signed_in = home(AlwaysIn);
    let signed_out = home(NeverIn);

    assert_eq!(signed_in.destination(), "Home");
    assert_eq!(signed_out.destination(), "Login");
    assert!(signed_in == signed_out);
}

#[test]
fn test_route_model_hashes_by_identity() {
    let routes: HashSet<HomeRoute> = [home(AlwaysIn), home(NeverIn)].into_iter().collect();
    assert_eq!(routes.len(), 1);
}

#[test]
fn test_route_model_with_generics_and_qualified_path() {
    let a = ArticleRoute {
        slug: "intro".to_string(),
        payload: vec![1u8, 2, 3],
    };
    let b = ArticleRoute {
        slug: "intro".to_string(),
        payload: Vec::new(),
    };
    let c = ArticleRoute {
        slug: "outro".to_string(),
        payload: vec![9u8],
    };

    assert_eq!(a.payload.len() + b.payload.len() + c.payload.len(), 4);
    assert!(a == b);
    assert!(a != c);
}

#[test]
fn test_route_model_types_are_stackable() {
    let mut router = Router::new();
    router.navigate(home(NeverIn));
    router.navigate(ArticleRoute {
        slug: "intro".to_string(),
        payload: (),
    });
    router.navigate(home(AlwaysIn));

    assert_eq!(router.position_of(&"home"), Some(2));
    assert_eq!(router.position_of(&"intro".to_string()), Some(1));

    let probe = AnyRoute::new(home(AlwaysIn));
    router.pop_to_route(&probe).unwrap();
    assert_eq!(router.len(), 2);
    assert!(router.current().unwrap().is::<ArticleRoute<()>>());
}
