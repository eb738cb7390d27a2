use the_arr::{
  SortFlags,
  Value,
  array,
};
use the_collection::Collection;

fn main() {
  let orders = Collection::make(array![
    array!["account_id" => "x10", "product" => "Chair", "total" => 120],
    array!["account_id" => "x10", "product" => "Bookcase", "total" => 340],
    array!["account_id" => "x11", "product" => "Desk", "total" => 560],
  ]);

  Collection::register("totals", |orders, _| {
    let orders = orders.cloned().unwrap_or_default();
    Value::from(orders.pluck("total", Some("product")).into_inner())
  });

  let by_account = orders.group_by("account_id", false);
  println!("accounts: {}", by_account.keys());
  println!(
    "largest: {}",
    orders
      .sort_by_desc("total", SortFlags::Regular)
      .first(Value::Null)
      .as_array()
      .and_then(|order| order.get(&"product".into()))
      .and_then(Value::as_str)
      .unwrap_or("none")
  );
  match orders.call("totals", Vec::new()) {
    Ok(totals) => println!("totals: {}", Collection::make(totals)),
    Err(err) => eprintln!("{err}"),
  }
}
