use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{Backend, LoginReply, UploadFile};
use crate::{
    pages::{
        customer::{Customer, CustomerForm, MeasurementFile, Measurements},
        employee::{Employee, EmployeeForm, Role},
        item::{Item, ItemForm, ItemOption},
        order::{CustomerRef, NewOrder, Order, OrderStatus, Product},
    },
    AdminError, AdminResult,
};

pub const USER: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const UPSTREAM_TOKEN: &str = "upstream-token";

/// Collections held by [`MemoryBackend`], open for assertions
#[derive(Default)]
pub struct Store {
    pub employees: Vec<Employee>,
    pub payments: Vec<(String, f64)>,
    pub customers: Vec<Customer>,
    pub items: Vec<Item>,
    pub orders: Vec<Order>,
    pub products: Vec<Product>,
    pub placed: Vec<NewOrder>,
    pub uploads: Vec<UploadFile>,
    next_id: usize,
}

impl Store {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

/// Backend double for router tests
#[derive(Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

fn not_found(what: &str, id: &str) -> AdminError {
    AdminError::NotFound(format!("{what} {id} not found"))
}

impl MemoryBackend {
    pub fn seeded() -> Self {
        let ali = Customer {
            id: "c1".into(),
            name: "Ali Raza".into(),
            phone: "0300-1234567".into(),
            address: "Lahore".into(),
            ..Default::default()
        };
        let shirt = Product {
            id: "p1".into(),
            ty: "Shirt".into(),
            price: 1500.0,
            assigned_employees: vec!["e1".into()],
            status: OrderStatus::Completed,
            ..Default::default()
        };
        let store = Store {
            employees: vec![Employee {
                id: "e1".into(),
                name: "Bilal".into(),
                cnic: "35202-1234567-1".into(),
                phone: "0311-7654321".into(),
                role: Role::Stitcher,
                payment: 0.0,
                products: vec!["p1".into()],
            }],
            customers: vec![ali.clone()],
            items: vec![
                Item {
                    id: "i1".into(),
                    name: "Shirt".into(),
                    price: 1500.0,
                    options: vec![ItemOption {
                        name: "Collar".into(),
                        customizations: vec!["Band".into(), "Classic".into()],
                    }],
                },
                Item {
                    id: "i2".into(),
                    name: "Pant".into(),
                    price: 1200.0,
                    options: Vec::new(),
                },
            ],
            orders: vec![Order {
                id: "o1".into(),
                date: Utc::now(),
                customer: CustomerRef::Populated(Box::new(ali)),
                products: vec![shirt.clone()],
                total: 1500.0,
                status: OrderStatus::Pending,
                paid: false,
            }],
            products: vec![shirt],
            next_id: 100,
            ..Default::default()
        };
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn authorized(&self, token: &str) -> AdminResult<MutexGuard<'_, Store>> {
        if token != UPSTREAM_TOKEN {
            return Err(AdminError::Unauthorized("jwt expired".into()));
        }
        Ok(self.store())
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn login(&self, user_name: &str, password: &str) -> AdminResult<LoginReply> {
        if user_name == USER && password == PASSWORD {
            Ok(LoginReply {
                token: UPSTREAM_TOKEN.into(),
                name: Some("Shop Admin".into()),
                role: None,
            })
        } else {
            Err(AdminError::Unauthorized("Invalid credentials".into()))
        }
    }

    async fn employees(&self, token: &str) -> AdminResult<Vec<Employee>> {
        Ok(self.authorized(token)?.employees.clone())
    }

    async fn employee(&self, token: &str, id: &str) -> AdminResult<Employee> {
        let store = self.authorized(token)?;
        store
            .employees
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| not_found("Employee", id))
    }

    async fn add_employee(&self, token: &str, form: &EmployeeForm) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let id = store.id("e");
        store.employees.push(Employee {
            id,
            name: form.name.clone(),
            cnic: form.cnic.clone(),
            phone: form.phone.clone(),
            role: Role::parse(&form.role).unwrap_or(Role::Sales),
            payment: 0.0,
            products: Vec::new(),
        });
        Ok(())
    }

    async fn edit_employee(&self, token: &str, id: &str, form: &EmployeeForm) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let employee = store
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Employee", id))?;
        employee.name = form.name.clone();
        employee.cnic = form.cnic.clone();
        employee.phone = form.phone.clone();
        if let Some(role) = Role::parse(&form.role) {
            employee.role = role;
        }
        Ok(())
    }

    async fn delete_employee(&self, token: &str, id: &str) -> AdminResult<()> {
        self.authorized(token)?.employees.retain(|e| e.id != id);
        Ok(())
    }

    async fn pay_employee(&self, token: &str, id: &str, amount: f64) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let employee = store
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found("Employee", id))?;
        employee.payment += amount;
        store.payments.push((id.to_owned(), amount));
        Ok(())
    }

    async fn customers(&self, token: &str) -> AdminResult<Vec<Customer>> {
        Ok(self.authorized(token)?.customers.clone())
    }

    async fn customer(&self, token: &str, id: &str) -> AdminResult<Customer> {
        let store = self.authorized(token)?;
        store
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| not_found("Customer", id))
    }

    async fn add_customer(&self, token: &str, form: &CustomerForm) -> AdminResult<Customer> {
        let mut store = self.authorized(token)?;
        let customer = Customer {
            id: store.id("c"),
            name: form.name.clone(),
            phone: form.phone.clone(),
            address: form.address.clone(),
            ..Default::default()
        };
        store.customers.push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, token: &str, id: &str, form: &CustomerForm) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let customer = store
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Customer", id))?;
        customer.name = form.name.clone();
        customer.phone = form.phone.clone();
        customer.address = form.address.clone();
        Ok(())
    }

    async fn update_measurements(
        &self,
        token: &str,
        id: &str,
        measurements: &Measurements,
    ) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let customer = store
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found("Customer", id))?;
        customer.measurements = Some(*measurements);
        Ok(())
    }

    async fn delete_customer(&self, token: &str, id: &str) -> AdminResult<()> {
        self.authorized(token)?.customers.retain(|c| c.id != id);
        Ok(())
    }

    async fn customer_orders(&self, token: &str, id: &str) -> AdminResult<Vec<Order>> {
        let store = self.authorized(token)?;
        Ok(store
            .orders
            .iter()
            .filter(|o| o.customer.id() == id)
            .cloned()
            .collect())
    }

    async fn upload_measurement_files(
        &self,
        token: &str,
        customer_id: &str,
        files: Vec<UploadFile>,
    ) -> AdminResult<Vec<MeasurementFile>> {
        let mut store = self.authorized(token)?;
        let mut added = Vec::with_capacity(files.len());
        for file in &files {
            added.push(MeasurementFile {
                id: store.id("f"),
                name: file.name.clone(),
                mime_type: file.content_type.clone(),
                url: format!("/uploads/{}", file.name),
                uploaded_at: Some(Utc::now()),
            });
        }
        let customer = store
            .customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| not_found("Customer", customer_id))?;
        customer.measurement_files.extend(added.iter().cloned());
        store.uploads.extend(files);
        Ok(added)
    }

    async fn remove_measurement_file(&self, token: &str, file_id: &str) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        for customer in &mut store.customers {
            customer.measurement_files.retain(|f| f.id != file_id);
        }
        Ok(())
    }

    async fn items(&self, token: &str) -> AdminResult<Vec<Item>> {
        Ok(self.authorized(token)?.items.clone())
    }

    async fn add_item(&self, token: &str, form: &ItemForm) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let id = store.id("i");
        store.items.push(Item {
            id,
            name: form.name.clone(),
            price: form.price,
            options: form.options.clone(),
        });
        Ok(())
    }

    async fn edit_item(&self, token: &str, id: &str, form: &ItemForm) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let item = store
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("Item", id))?;
        item.name = form.name.clone();
        item.price = form.price;
        item.options = form.options.clone();
        Ok(())
    }

    async fn delete_item(&self, token: &str, id: &str) -> AdminResult<()> {
        self.authorized(token)?.items.retain(|i| i.id != id);
        Ok(())
    }

    async fn orders(&self, token: &str) -> AdminResult<Vec<Order>> {
        Ok(self.authorized(token)?.orders.clone())
    }

    async fn order(&self, token: &str, id: &str) -> AdminResult<Order> {
        let store = self.authorized(token)?;
        store
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| not_found("Order", id))
    }

    async fn place_order(&self, token: &str, order: &NewOrder) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let customer = store
            .customers
            .iter()
            .find(|c| c.id == order.customer)
            .cloned()
            .ok_or_else(|| not_found("Customer", &order.customer))?;
        let mut products = Vec::with_capacity(order.products.len());
        for line in &order.products {
            products.push(Product {
                id: store.id("p"),
                ty: line.ty.clone(),
                price: line.price,
                instructions: line.instructions.clone(),
                options: line.options.clone(),
                ..Default::default()
            });
        }
        let id = store.id("o");
        store.products.extend(products.iter().cloned());
        store.orders.push(Order {
            id,
            date: Utc::now(),
            customer: CustomerRef::Populated(Box::new(customer)),
            products,
            total: order.total,
            status: OrderStatus::Pending,
            paid: false,
        });
        store.placed.push(order.clone());
        Ok(())
    }

    async fn update_order_status(&self, token: &str, id: &str, status: OrderStatus) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("Order", id))?;
        order.status = status;
        Ok(())
    }

    async fn update_order_payment(&self, token: &str, id: &str, paid: bool) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let order = store
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found("Order", id))?;
        order.paid = paid;
        Ok(())
    }

    async fn products(&self, token: &str) -> AdminResult<Vec<Product>> {
        Ok(self.authorized(token)?.products.clone())
    }

    async fn assign_employees(
        &self,
        token: &str,
        product_id: &str,
        employee_ids: &[String],
    ) -> AdminResult<()> {
        let mut store = self.authorized(token)?;
        let product = store
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| not_found("Product", product_id))?;
        product.assigned_employees = employee_ids.to_vec();
        Ok(())
    }
}
