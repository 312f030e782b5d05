//! End-to-end catalog flows over the in-memory store

use std::sync::Arc;

use menu_core::domain::{CategoryFields, MenuItemFields, SubcategoryDraft, SubcategoryFields};
use menu_core::error::DomainError;
use menu_core::ordering::is_dense;
use menu_core::repositories::CatalogStore;
use menu_core::services::{CatalogService, MenuService, TreeBuilder};
use menu_infrastructure::InMemoryCatalogStore;
use menu_shared::{CategoryDeletePolicy, EntityId};

fn setup(policy: CategoryDeletePolicy) -> (Arc<InMemoryCatalogStore>, CatalogService<InMemoryCatalogStore>) {
    let store = Arc::new(InMemoryCatalogStore::new());
    let service = CatalogService::new(store.clone(), policy);
    (store, service)
}

async fn category_ids(store: &InMemoryCatalogStore) -> Vec<EntityId> {
    store
        .list_categories()
        .await
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect()
}

#[tokio::test]
async fn third_subcategory_is_appended() {
    let (_, service) = setup(CategoryDeletePolicy::Reject);
    let category = service
        .create_category(CategoryFields::new("Çorbalar", "Soups"))
        .await
        .unwrap();
    for name in ["Sıcak", "Soğuk"] {
        service
            .create_subcategory(category.id, SubcategoryFields::new(name, ""))
            .await
            .unwrap();
    }

    let third = service
        .create_subcategory(category.id, SubcategoryFields::new("Günün Çorbası", "Soup of the Day"))
        .await
        .unwrap();
    assert_eq!(third.order, 2);
    assert_eq!(third.slug(), format!("gunun-corbasi-{}", third.id));
}

#[tokio::test]
async fn reorder_categories_moves_first_to_last() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let mut ids = Vec::new();
    for name in ["Kahvaltı", "Ana Yemek", "Tatlı"] {
        ids.push(service.create_category(CategoryFields::new(name, "")).await.unwrap().id);
    }

    let result = service
        .ordering()
        .reorder_categories(ids[0], 0, 2)
        .await
        .unwrap();
    let reordered: Vec<EntityId> = result.iter().map(|c| c.id).collect();
    assert_eq!(reordered, vec![ids[1], ids[2], ids[0]]);
    let orders: Vec<i32> = result.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
    assert_eq!(category_ids(&store).await, reordered);
}

#[tokio::test]
async fn stale_reorder_is_rejected_before_any_write() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let first = service.create_category(CategoryFields::new("A", "")).await.unwrap();
    let second = service.create_category(CategoryFields::new("B", "")).await.unwrap();

    let result = service.ordering().reorder_categories(second.id, 0, 1).await;
    assert!(matches!(result, Err(DomainError::InvalidReorder { .. })));
    assert_eq!(category_ids(&store).await, vec![first.id, second.id]);
}

#[tokio::test]
async fn reorder_subcategories_moves_last_to_front() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let kebabs = service
        .create_category(CategoryFields::new("Kebaplar", "Kebabs"))
        .await
        .unwrap();
    let drinks = service
        .create_category(CategoryFields::new("İçecekler", "Drinks"))
        .await
        .unwrap();
    let mut ids = Vec::new();
    for name in ["Adana", "Urfa", "Beyti", "İskender"] {
        let sub = service
            .create_subcategory(kebabs.id, SubcategoryFields::new(name, ""))
            .await
            .unwrap();
        ids.push(sub.id);
    }
    let foreign = service
        .create_subcategory(drinks.id, SubcategoryFields::new("Sıcak", "Hot"))
        .await
        .unwrap();

    let result = service
        .ordering()
        .reorder_subcategories(kebabs.id, ids[3], 3, 0)
        .await
        .unwrap();
    let positions: Vec<(EntityId, i32)> = result.iter().map(|s| (s.id, s.order)).collect();
    assert_eq!(
        positions,
        vec![(ids[3], 0), (ids[0], 1), (ids[1], 2), (ids[2], 3)]
    );
    let stored: Vec<i32> = store
        .list_subcategories(Some(kebabs.id))
        .await
        .unwrap()
        .iter()
        .map(|s| s.order)
        .collect();
    assert!(is_dense(&stored));

    let result = service
        .ordering()
        .reorder_subcategories(kebabs.id, foreign.id, 0, 1)
        .await;
    assert!(matches!(result, Err(DomainError::InvalidReorder { .. })));
    let unchanged: Vec<EntityId> = store
        .list_subcategories(Some(kebabs.id))
        .await
        .unwrap()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(unchanged, vec![ids[3], ids[0], ids[1], ids[2]]);
    assert_eq!(store.find_subcategory(foreign.id).await.unwrap().unwrap().order, 0);
}

#[tokio::test]
async fn deleting_subcategory_keeps_siblings_dense_and_items_in_category() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let category = service
        .create_category(CategoryFields::new("İçecekler", "Drinks"))
        .await
        .unwrap();
    let mut subs = Vec::new();
    for name in ["Sıcak", "Soğuk", "Alkollü", "Taze"] {
        subs.push(
            service
                .create_subcategory(category.id, SubcategoryFields::new(name, ""))
                .await
                .unwrap(),
        );
    }
    let tea = service
        .create_menu_item(MenuItemFields::new(category.id, "Çay", "Tea", 20.0).in_subcategory(subs[1].id))
        .await
        .unwrap();

    let detached = service.delete_subcategory(subs[1].id).await.unwrap();
    assert_eq!(detached, 1);

    let remaining = store.list_subcategories(Some(category.id)).await.unwrap();
    let orders: Vec<i32> = remaining.iter().map(|s| s.order).collect();
    assert!(is_dense(&orders));
    let remaining_ids: Vec<EntityId> = remaining.iter().map(|s| s.id).collect();
    assert_eq!(remaining_ids, vec![subs[0].id, subs[2].id, subs[3].id]);

    let tea = service.menu_item(tea.id).await.unwrap();
    assert_eq!(tea.category_id, category.id);
    assert_eq!(tea.subcategory_id, None);
}

#[tokio::test]
async fn tree_counts_items_per_category() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    assert!(TreeBuilder::new(store.clone()).build().await.unwrap().is_empty());

    let soups = service.create_category(CategoryFields::new("Çorbalar", "")).await.unwrap();
    let desserts = service.create_category(CategoryFields::new("Tatlılar", "")).await.unwrap();
    let hot = service
        .create_subcategory(soups.id, SubcategoryFields::new("Sıcak", ""))
        .await
        .unwrap();
    service
        .create_menu_item(MenuItemFields::new(soups.id, "Mercimek", "", 80.0).in_subcategory(hot.id))
        .await
        .unwrap();
    service
        .create_menu_item(MenuItemFields::new(soups.id, "Ezogelin", "", 80.0))
        .await
        .unwrap();

    let tree = TreeBuilder::new(store).build().await.unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].category.id, soups.id);
    assert_eq!(tree[0].item_count, 2);
    assert_eq!(tree[0].subcategories[0].item_count, 1);
    assert_eq!(tree[1].category.id, desserts.id);
    assert_eq!(tree[1].item_count, 0);
}

#[tokio::test]
async fn reject_policy_blocks_category_with_dependents() {
    let (_, service) = setup(CategoryDeletePolicy::Reject);
    let category = service.create_category(CategoryFields::new("Kebaplar", "")).await.unwrap();
    service
        .create_menu_item(MenuItemFields::new(category.id, "Adana", "", 300.0))
        .await
        .unwrap();

    let result = service.delete_category(category.id).await;
    assert!(matches!(
        result,
        Err(DomainError::HasDependents { items: 1, subcategories: 0, .. })
    ));
    assert!(service.category(category.id).await.is_ok());
}

#[tokio::test]
async fn cascade_policy_removes_subcategories_and_renumbers() {
    let (store, service) = setup(CategoryDeletePolicy::Cascade);
    let first = service.create_category(CategoryFields::new("A", "")).await.unwrap();
    let (middle, subs) = service
        .create_category_with_subcategories(
            CategoryFields::new("B", ""),
            vec![
                SubcategoryFields::new("B1", ""),
                SubcategoryFields::new(" ", ""),
                SubcategoryFields::new("B2", ""),
            ],
        )
        .await
        .unwrap();
    let last = service.create_category(CategoryFields::new("C", "")).await.unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[1].order, 1);

    service.delete_category(middle.id).await.unwrap();

    assert!(store.list_subcategories(Some(middle.id)).await.unwrap().is_empty());
    let remaining = store.list_categories().await.unwrap();
    let ids: Vec<EntityId> = remaining.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, last.id]);
    assert_eq!(remaining[1].order, 1);
}

#[tokio::test]
async fn drafts_insert_update_and_reorder() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let category = service.create_category(CategoryFields::new("Salatalar", "")).await.unwrap();
    let green = service
        .create_subcategory(category.id, SubcategoryFields::new("Yeşil", ""))
        .await
        .unwrap();
    let warm = service
        .create_subcategory(category.id, SubcategoryFields::new("Ilık", ""))
        .await
        .unwrap();

    let drafts = vec![
        SubcategoryDraft::pending(1, SubcategoryFields::new("Mevsim", "Seasonal")),
        SubcategoryDraft::persisted(warm.id, SubcategoryFields::new("Ilık Salatalar", "Warm")),
        SubcategoryDraft::pending(2, SubcategoryFields::new("", "")),
        SubcategoryDraft::persisted(green.id, SubcategoryFields::new("Yeşil", "Green")),
    ];
    let saved = service
        .save_subcategory_drafts(category.id, drafts)
        .await
        .unwrap();

    assert_eq!(saved.len(), 3);
    assert_eq!(saved[0].name_tr, "Mevsim");
    assert_eq!(saved[1].id, warm.id);
    assert_eq!(saved[1].name_tr, "Ilık Salatalar");
    assert_eq!(saved[2].id, green.id);
    assert_eq!(saved[2].name_en, "Green");
    let orders: Vec<i32> = store
        .list_subcategories(Some(category.id))
        .await
        .unwrap()
        .iter()
        .map(|s| s.order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[tokio::test]
async fn item_page_lists_three_similar_items() {
    let (store, service) = setup(CategoryDeletePolicy::Reject);
    let category = service.create_category(CategoryFields::new("Pideler", "")).await.unwrap();
    let other = service.create_category(CategoryFields::new("Dürümler", "")).await.unwrap();
    let mut viewed = None;
    for name in ["Kaşarlı", "Kıymalı", "Kuşbaşılı", "Karışık", "Sucuklu"] {
        let item = service
            .create_menu_item(MenuItemFields::new(category.id, name, "", 150.0))
            .await
            .unwrap();
        viewed.get_or_insert(item);
    }
    service
        .create_menu_item(MenuItemFields::new(other.id, "Tavuk", "", 120.0))
        .await
        .unwrap();
    let viewed = viewed.unwrap();

    let page = MenuService::new(store).item_page(&viewed.slug()).await.unwrap();
    assert_eq!(page.item.id, viewed.id);
    assert_eq!(page.similar_items.len(), 3);
    assert!(page
        .similar_items
        .iter()
        .all(|i| i.id != viewed.id && i.category_id == category.id));
}
