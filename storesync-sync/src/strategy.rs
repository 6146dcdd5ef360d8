//! Per-kind sync strategies.
//!
//! One strategy per resource kind bundles the draft/existing/action types
//! with the kind's diff entry point; the engine is generic over it.

use std::collections::HashMap;
use storesync_diff::hooks::DiffHooks;
use storesync_diff::{category, product, product_type, shopping_list};
use storesync_resolver::HasReferences;
use storesync_types::{
    AttributeMetaData, Category, CategoryDraft, CategoryUpdateAction, HasKey, Product,
    ProductDraft, ProductType, ProductTypeDraft, ProductTypeUpdateAction, ProductUpdateAction,
    ResourceKind, ShoppingList, ShoppingListDraft, ShoppingListUpdateAction,
};

/// The per-kind capabilities the engine needs.
pub trait ResourceStrategy: Send + Sync + 'static {
    type Draft: HasKey + HasReferences + Clone + Send + Sync;
    type Existing: HasKey + Clone + Send + Sync;
    type Action: Clone + Send + Sync;

    /// Kind tag, for logging and error messages.
    fn kind(&self) -> ResourceKind;

    /// Builds the ordered action list for one matched pair.
    fn diff(
        &self,
        existing: &Self::Existing,
        draft: &Self::Draft,
        hooks: &mut dyn DiffHooks,
    ) -> Vec<Self::Action>;
}

/// Product sync strategy. Carries the attribute metadata the product diff
/// needs to split per-variant from same-for-all attributes.
pub struct ProductStrategy {
    pub attributes_meta: HashMap<String, AttributeMetaData>,
}

impl ProductStrategy {
    #[must_use]
    pub fn new(attributes_meta: HashMap<String, AttributeMetaData>) -> Self {
        Self { attributes_meta }
    }
}

impl ResourceStrategy for ProductStrategy {
    type Draft = ProductDraft;
    type Existing = Product;
    type Action = ProductUpdateAction;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Product
    }

    fn diff(
        &self,
        existing: &Product,
        draft: &ProductDraft,
        hooks: &mut dyn DiffHooks,
    ) -> Vec<ProductUpdateAction> {
        product::build_actions(existing, draft, &self.attributes_meta, hooks)
    }
}

/// Category sync strategy.
pub struct CategoryStrategy;

impl ResourceStrategy for CategoryStrategy {
    type Draft = CategoryDraft;
    type Existing = Category;
    type Action = CategoryUpdateAction;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Category
    }

    fn diff(
        &self,
        existing: &Category,
        draft: &CategoryDraft,
        hooks: &mut dyn DiffHooks,
    ) -> Vec<CategoryUpdateAction> {
        category::build_actions(existing, draft, hooks)
    }
}

/// Product type sync strategy.
pub struct ProductTypeStrategy;

impl ResourceStrategy for ProductTypeStrategy {
    type Draft = ProductTypeDraft;
    type Existing = ProductType;
    type Action = ProductTypeUpdateAction;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ProductType
    }

    fn diff(
        &self,
        existing: &ProductType,
        draft: &ProductTypeDraft,
        hooks: &mut dyn DiffHooks,
    ) -> Vec<ProductTypeUpdateAction> {
        product_type::build_actions(existing, draft, hooks)
    }
}

/// Shopping list sync strategy.
pub struct ShoppingListStrategy;

impl ResourceStrategy for ShoppingListStrategy {
    type Draft = ShoppingListDraft;
    type Existing = ShoppingList;
    type Action = ShoppingListUpdateAction;

    fn kind(&self) -> ResourceKind {
        ResourceKind::ShoppingList
    }

    fn diff(
        &self,
        existing: &ShoppingList,
        draft: &ShoppingListDraft,
        hooks: &mut dyn DiffHooks,
    ) -> Vec<ShoppingListUpdateAction> {
        shopping_list::build_actions(existing, draft, hooks)
    }
}
