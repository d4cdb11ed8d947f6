//! GraphQL documents for the Admin API.
//!
//! Selection sets here must stay in lockstep with the `*Node` structs in
//! [`super::types`].

pub const PRODUCT_FIELDS: &str = r"
    id
    title
    description
    status
    vendor
    productType
    tags
    totalInventory
    featuredImage { url }
    seo { title description }
    variants(first: 1) {
        edges { node { price sku } }
        pageInfo { hasNextPage endCursor }
    }
";

pub const GET_PRODUCTS: &str = r"
    query GetProducts($first: Int!, $after: String, $query: String) {
        products(first: $first, after: $after, query: $query) {
            edges { node { ...fields } }
            pageInfo { hasNextPage endCursor }
        }
    }
";

pub const GET_PRODUCT: &str = r"
    query GetProduct($id: ID!) {
        product(id: $id) { ...fields }
    }
";

pub const PRODUCT_CREATE: &str = r"
    mutation ProductCreate($input: ProductInput!) {
        productCreate(input: $input) {
            product { ...fields }
            userErrors { message }
        }
    }
";

pub const PRODUCT_UPDATE: &str = r"
    mutation ProductUpdate($input: ProductInput!) {
        productUpdate(input: $input) {
            product { ...fields }
            userErrors { message }
        }
    }
";

pub const PRODUCT_DELETE: &str = r"
    mutation ProductDelete($input: ProductDeleteInput!) {
        productDelete(input: $input) {
            deletedProductId
            userErrors { message }
        }
    }
";

pub const COLLECTION_FIELDS: &str = r"
    id
    title
    description
    handle
    image { url }
    productsCount
    publishedOnCurrentPublication
";

pub const GET_COLLECTIONS: &str = r"
    query GetCollections($first: Int!, $after: String) {
        collections(first: $first, after: $after) {
            edges { node { ...fields } }
            pageInfo { hasNextPage endCursor }
        }
    }
";

pub const GET_COLLECTION: &str = r"
    query GetCollection($id: ID!) {
        collection(id: $id) { ...fields }
    }
";

pub const CUSTOMER_FIELDS: &str = r"
    id
    displayName
    email
    phone
    state
    amountSpent { amount }
    numberOfOrders
    defaultAddress { country province }
";

pub const GET_CUSTOMERS: &str = r"
    query GetCustomers($first: Int!, $after: String) {
        customers(first: $first, after: $after) {
            edges { node { ...fields } }
            pageInfo { hasNextPage endCursor }
        }
    }
";

pub const GET_CUSTOMER: &str = r"
    query GetCustomer($id: ID!) {
        customer(id: $id) { ...fields }
    }
";

pub const ORDER_FIELDS: &str = r"
    id
    name
    customer { displayName email }
    totalPriceSet { shopMoney { amount } }
    subtotalPriceSet { shopMoney { amount } }
    totalTaxSet { shopMoney { amount } }
    displayFinancialStatus
    displayFulfillmentStatus
    currencyCode
    subtotalLineItemsQuantity
    note
";

pub const GET_ORDERS: &str = r"
    query GetOrders($first: Int!, $after: String) {
        orders(first: $first, after: $after, sortKey: CREATED_AT, reverse: true) {
            edges { node { ...fields } }
            pageInfo { hasNextPage endCursor }
        }
    }
";

pub const GET_ORDER: &str = r"
    query GetOrder($id: ID!) {
        order(id: $id) { ...fields }
    }
";

pub const DISCOUNT_FIELDS: &str = r"
    id
    discount {
        __typename
        ... on DiscountCodeBasic {
            title
            status
            startsAt
            endsAt
            usageLimit
            codes(first: 1) {
                edges { node { code } }
                pageInfo { hasNextPage endCursor }
            }
            customerGets {
                value {
                    __typename
                    ... on DiscountPercentage { percentage }
                    ... on DiscountAmount { amount { amount } }
                }
            }
        }
        ... on DiscountAutomaticBasic {
            title
            status
            startsAt
            endsAt
            customerGets {
                value {
                    __typename
                    ... on DiscountPercentage { percentage }
                    ... on DiscountAmount { amount { amount } }
                }
            }
        }
    }
";

pub const GET_DISCOUNTS: &str = r"
    query GetDiscounts($first: Int!, $after: String) {
        discountNodes(first: $first, after: $after) {
            edges { node { ...fields } }
            pageInfo { hasNextPage endCursor }
        }
    }
";

pub const DISCOUNT_CODE_BASIC_CREATE: &str = r"
    mutation DiscountCodeBasicCreate($basicCodeDiscount: DiscountCodeBasicInput!) {
        discountCodeBasicCreate(basicCodeDiscount: $basicCodeDiscount) {
            codeDiscountNode { ...fields }
            userErrors { message }
        }
    }
";

pub const DISCOUNT_CODE_DEACTIVATE: &str = r"
    mutation DiscountCodeDeactivate($id: ID!) {
        discountCodeDeactivate(id: $id) {
            codeDiscountNode { ...fields }
            userErrors { message }
        }
    }
";

/// Splice a field fragment into a document in place of `...fields`.
#[must_use]
pub fn with_fields(document: &str, fields: &str) -> String {
    document.replace("...fields", fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_fields_splices_selection_set() {
        let doc = with_fields(GET_PRODUCT, PRODUCT_FIELDS);
        assert!(doc.contains("totalInventory"));
        assert!(!doc.contains("...fields"));
    }
}
