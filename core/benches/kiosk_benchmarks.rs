use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kiosk::{
  BasketStore, ContactInfo, DeliveryInfo, Item, ItemId, KioskConfig, PaymentMethod, PricelessPolicy, ScriptedGateway,
  ShopBroker, ShopEvent, Storefront, Topic,
};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

fn bench_item(n: usize) -> Item {
  Item {
    id: ItemId::new(format!("item-{}", n)),
    title: format!("Item {}", n),
    description: String::new(),
    image_ref: format!("/item-{}.svg", n),
    category: "bench".to_string(),
    price: Some(Decimal::new(n as i64 * 100 + 99, 2)),
  }
}

// --- Benchmark Functions ---

fn bench_broker_fan_out(c: &mut Criterion) {
  let mut group = c.benchmark_group("BrokerFanOut");

  for num_handlers in [1usize, 10, 100].iter() {
    let broker = ShopBroker::new();
    let hits = Arc::new(AtomicU64::new(0));
    for _ in 0..*num_handlers {
      let hits = Arc::clone(&hits);
      broker.subscribe(Topic::OpenBasket, move |_: &ShopEvent| {
        hits.fetch_add(1, Ordering::Relaxed);
      });
    }
    // Handlers on other topics must not slow down dispatch much.
    for _ in 0..*num_handlers {
      broker.subscribe(Topic::CloseSurface, |_: &ShopEvent| {});
    }

    group.throughput(Throughput::Elements(*num_handlers as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_handlers), num_handlers, |b, _| {
      b.iter(|| black_box(broker.publish(ShopEvent::OpenBasket)));
    });
  }
  group.finish();
}

fn bench_basket_operations(c: &mut Criterion) {
  let mut group = c.benchmark_group("Basket");

  for num_items in [10usize, 100].iter() {
    let items: Vec<Item> = (0..*num_items).map(bench_item).collect();

    group.throughput(Throughput::Elements(*num_items as u64));
    group.bench_with_input(BenchmarkId::new("fill_and_total", num_items), &items, |b, items| {
      b.iter_batched(
        || BasketStore::new(Arc::new(ShopBroker::new()), PricelessPolicy::Reject),
        |basket| {
          for item in items {
            basket.add(item.clone());
          }
          black_box(basket.total())
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

fn bench_checkout_cycle(c: &mut Criterion) {
  let mut group = c.benchmark_group("CheckoutCycle");
  let rt = Runtime::new().unwrap();
  let catalog: Vec<Item> = (0..20).map(bench_item).collect();

  group.throughput(Throughput::Elements(1)); // 1 completed order
  group.bench_function("scripted_gateway", |b| {
    b.to_async(&rt).iter_batched(
      || {
        let storefront = Storefront::with_runtime(
          &KioskConfig::default(),
          Arc::new(ScriptedGateway::new(catalog.clone())),
          rt.handle().clone(),
        );
        storefront.catalog().load(catalog.clone());
        storefront
      },
      |storefront| async move {
        let intents = [
          ShopEvent::AddToBasket(ItemId::new("item-1")),
          ShopEvent::AddToBasket(ItemId::new("item-2")),
          ShopEvent::OpenBasket,
          ShopEvent::ProceedToDelivery,
          ShopEvent::ConfirmDelivery(DeliveryInfo::new(Some(PaymentMethod::Card), "Bench St 1")),
          ShopEvent::ConfirmContacts(ContactInfo::new("+100", "bench@example.com")),
          ShopEvent::AcknowledgeOrder,
        ];
        for intent in intents {
          black_box(storefront.dispatch(intent).await.unwrap());
        }
      },
      criterion::BatchSize::SmallInput,
    );
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_broker_fan_out,
  bench_basket_operations,
  bench_checkout_cycle
);
criterion_main!(benches);
