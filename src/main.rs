mod infra;
use infra::*;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::{Build, Request, Response, Rocket};

#[macro_use]
extern crate rocket;
pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "Attaching CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// Answers CORS preflight requests; the headers come from the fairing.
#[options("/<_..>")]
fn preflight() -> Status {
    Status::NoContent
}

pub fn build(store: Box<dyn Store>) -> Rocket<Build> {
    rocket::build()
        .manage(store)
        .mount(
            "/",
            routes![
                preflight,
                create_ingredient,
                create_ingredients,
                get_ingredients,
                search_ingredients,
                get_ingredients_by_category,
                get_ingredient,
                update_ingredient,
                delete_ingredient,
                get_inventory,
                get_low_stock,
                get_inventory_for_ingredient,
                get_expiring_inventory,
                add_to_inventory,
                update_inventory_item,
                remove_from_inventory,
                create_recipe,
                get_recipes,
                search_recipes,
                get_recipes_by_category,
                get_recipe,
                get_recipe_links,
                update_recipe,
                delete_recipe
            ],
        )
        .attach(CORS)
}

#[launch]
fn rocket() -> _ {
    let config = Config::from_env().unwrap();
    let store: Box<dyn Store> = match config.backend {
        Backend::Mongo => Box::new(MongoRep::init(config.mongodb_uri, &config.database).unwrap()),
        Backend::Memory => {
            log::warn!("using the in-memory store, nothing will be persisted");
            Box::new(MemoryRep::default())
        }
    };
    build(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};

    fn client() -> Client {
        Client::tracked(build(Box::new(MemoryRep::default()))).unwrap()
    }

    fn create_ingredient(client: &Client, name: &str) -> String {
        let response = client
            .post("/ingredients")
            .json(&json!({ "name": name, "unit": "g", "caloriesPerUnit": 1.5 }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    fn recipe_body(title: &str, links: Value) -> Value {
        json!({
            "title": title,
            "description": "A family favourite",
            "instructions": "Mix, then bake for 40 minutes.",
            "category": "Dessert",
            "prepTime": 15,
            "cookTime": 40,
            "servings": 8,
            "ingredients": links,
        })
    }

    #[test]
    fn test_ingredient_crud() {
        let client = client();
        let id = create_ingredient(&client, "Farine");

        let response = client.get(format!("/ingredients/{}", id)).dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["name"], "Farine");
        assert_eq!(body["caloriesPerUnit"], 1.5);

        let response = client
            .put(format!("/ingredients/{}", id))
            .json(&json!({ "name": "Farine T55" }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["name"], "Farine T55");
        assert_eq!(body["unit"], Value::Null);

        let response = client.delete(format!("/ingredients/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NoContent);

        let response = client.get(format!("/ingredients/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NotFound);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["error"], format!("Ingredient not found with id: {}", id));
    }

    #[test]
    fn test_bulk_ingredients() {
        let client = client();
        let response = client
            .post("/ingredients/bulk")
            .json(&json!([{ "name": "Sel" }, { "name": "Poivre", "category": "Spice" }]))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);

        let response = client
            .post("/ingredients/bulk")
            .json(&json!([{ "name": "Sucre" }, { "name": "" }]))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);

        let response = client.get("/ingredients").dispatch();
        let body: Value = response.into_json().unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);

        let response = client.get("/ingredients/category/Spice").dispatch();
        let body: Value = response.into_json().unwrap();
        assert_eq!(body[0]["name"], "Poivre");

        let response = client.get("/ingredients/search?name=sel").dispatch();
        let body: Value = response.into_json().unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_id_is_bad_request() {
        let client = client();
        let response = client.get("/recipes/abricot.eth").dispatch();
        assert_eq!(response.status(), Status::BadRequest);
    }

    #[test]
    fn test_inventory_flow() {
        let client = client();
        let farine = create_ingredient(&client, "Farine");

        let response = client
            .post("/inventory")
            .json(&json!({
                "ingredientId": farine,
                "quantity": 10,
                "minStockLevel": 5,
                "location": "Pantry",
                "expirationDate": "2026-11-01",
                "status": "OUT_OF_STOCK"
            }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["status"], "IN_STOCK");
        let id = body["id"].as_str().unwrap().to_string();

        let response = client.get("/inventory/low-stock").dispatch();
        let body: Value = response.into_json().unwrap();
        assert!(body.as_array().unwrap().is_empty());

        let response = client
            .put(format!("/inventory/{}", id))
            .json(&json!({ "quantity": 3, "minStockLevel": 5 }))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["status"], "LOW_STOCK");
        assert_eq!(body["ingredientId"], farine.as_str());

        let response = client.get("/inventory/low-stock").dispatch();
        let body: Value = response.into_json().unwrap();
        assert_eq!(body[0]["id"], id.as_str());

        let response = client.get("/inventory/expiring?before=2026-12-01").dispatch();
        let body: Value = response.into_json().unwrap();
        assert!(body.as_array().unwrap().is_empty());

        let response = client.get("/inventory/expiring?before=tomorrow").dispatch();
        assert_eq!(response.status(), Status::BadRequest);

        let response = client.delete(format!("/ingredients/{}", farine)).dispatch();
        assert_eq!(response.status(), Status::Conflict);

        let response = client.delete(format!("/inventory/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NoContent);
        let response = client.delete(format!("/ingredients/{}", farine)).dispatch();
        assert_eq!(response.status(), Status::NoContent);
    }

    #[test]
    fn test_recipe_flow() {
        let client = client();
        let farine = create_ingredient(&client, "Farine");
        let beurre = create_ingredient(&client, "Beurre");

        let response = client
            .post("/recipes")
            .json(&recipe_body(
                "Butter Cake",
                json!([
                    { "ingredientId": farine, "quantity": 2 },
                    { "ingredientId": beurre, "quantity": 1, "notes": "softened" }
                ]),
            ))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let created: Value = response.into_json().unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(created["ingredients"][1]["ingredient"]["name"], "Beurre");
        assert_eq!(created["ingredients"][1]["notes"], "softened");

        let response = client
            .put(format!("/recipes/{}", id))
            .json(&recipe_body("Butter Cake", json!([{ "ingredientId": farine, "quantity": 5 }])))
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        let updated: Value = response.into_json().unwrap();
        assert_eq!(updated["createdAt"], created["createdAt"]);
        assert_ne!(updated["updatedAt"], created["updatedAt"]);

        let response = client.get(format!("/recipes/{}/ingredients", id)).dispatch();
        let links: Value = response.into_json().unwrap();
        assert_eq!(links.as_array().unwrap().len(), 1);
        assert_eq!(links[0]["ingredientId"], farine.as_str());
        assert_eq!(links[0]["quantity"], 5.0);

        let response = client.get("/recipes/search?query=CAKE").dispatch();
        let found: Value = response.into_json().unwrap();
        assert_eq!(found.as_array().unwrap().len(), 1);

        let response = client.get("/recipes/category/Dessert").dispatch();
        let found: Value = response.into_json().unwrap();
        assert_eq!(found[0]["id"], id.as_str());

        let response = client.delete(format!("/recipes/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NoContent);
        let response = client.get(format!("/recipes/{}", id)).dispatch();
        assert_eq!(response.status(), Status::NotFound);
        let response = client.get("/recipes").dispatch();
        let all: Value = response.into_json().unwrap();
        assert!(all.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_recipe_validation_errors() {
        let client = client();
        let farine = create_ingredient(&client, "Farine");

        let response = client
            .post("/recipes")
            .json(&recipe_body("Cake", json!([])))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);
        let body: Value = response.into_json().unwrap();
        assert_eq!(body["error"], "At least one ingredient is required");

        let response = client
            .post("/recipes")
            .json(&recipe_body("Cake", json!([{ "ingredientId": farine, "quantity": -1 }])))
            .dispatch();
        assert_eq!(response.status(), Status::BadRequest);

        let ghost = "637be8b4942c929a6d8710c9";
        let response = client
            .post("/recipes")
            .json(&recipe_body("Cake", json!([{ "ingredientId": ghost, "quantity": 1 }])))
            .dispatch();
        assert_eq!(response.status(), Status::NotFound);

        let response = client.get("/recipes").dispatch();
        let all: Value = response.into_json().unwrap();
        assert!(all.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_cors_headers_and_preflight() {
        let client = client();
        let response = client.options("/recipes").dispatch();
        assert_eq!(response.status(), Status::NoContent);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
    }
}
